pub mod choices;
pub mod diagnostics;
pub mod loaders;
pub mod option;
pub mod parameters;
pub mod question;
pub mod state;

pub use choices::{Choice, ChoiceSet};
pub use diagnostics::{Parsed, Warning};
pub use loaders::{load_all_toml_files, load_toml_to_question};
pub use option::{DropdownOption, NamedExpression};
pub use parameters::{DdlDisplay, DdlType, DropdownConfig, InputParameters};
pub use question::DropdownQuestion;
pub use state::{InputState, Rendered, TestInputField, WidgetDescription};
