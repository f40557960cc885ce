pub mod impl_console;
#[cfg(test)]
pub mod impl_fake;
#[cfg(feature = "gui")]
pub mod impl_gui;
pub mod interface;
