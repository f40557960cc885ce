/// Reads one label per line. ImageNet synset lines such as
/// `n02123045 tabby, tabby cat` keep only their first name.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let name = match line.split_once(' ') {
                Some((id, rest)) if is_synset_id(id) => rest,
                _ => line,
            };
            name.split(',').next().unwrap_or(name).trim().to_string()
        })
        .collect()
}

fn is_synset_id(token: &str) -> bool {
    token.len() == 9
        && token.starts_with('n')
        && token[1..].chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synset_lines() {
        let labels = parse_labels(
            "n01440764 tench, Tinca tinca\nn02123045 tabby, tabby cat\n\nn02099601 golden retriever\n",
        );

        assert_eq!(labels, vec!["tench", "tabby", "golden retriever"]);
    }

    #[test]
    fn test_plain_lines() {
        let labels = parse_labels("sofa\n  tabby cat  \nnotebook computer");

        assert_eq!(labels, vec!["sofa", "tabby cat", "notebook computer"]);
    }
}
