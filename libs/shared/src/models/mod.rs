pub mod playbook;
pub mod survey;
pub mod template;
pub mod value;

pub use playbook::TaskDescriptor;
pub use survey::{ApplicationEntry, Applications, SurveyQuestion, SurveySpec};
pub use template::DesiredTemplate;
pub use value::{VarValue, Variables};
