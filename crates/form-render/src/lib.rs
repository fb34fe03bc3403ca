//! Render planning and editing sessions for Barakatna forms.

mod plan;
mod session;

pub use plan::{Control, RenderField, RenderPlan, RenderSection};
pub use session::{FormSession, FormSink, SessionState, SubmitOutcome};
