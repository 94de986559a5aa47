pub mod answer_parser;
pub mod choice_builder;
pub mod display_resolver;
pub mod localization;
pub mod options_parser;

pub use answer_parser::{collect_options, ensure_correct, parse_option, parse_teacher_answer};
pub use choice_builder::build_choices;
pub use display_resolver::{resolve_displays, CasSession};
pub use localization::{DefaultStrings, Localizer, StringTable};
pub use options_parser::parse_options;
