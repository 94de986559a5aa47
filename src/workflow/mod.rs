pub mod dropdown_input;

pub use dropdown_input::{Adaptation, DropdownInput};
