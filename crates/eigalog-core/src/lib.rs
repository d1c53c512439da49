pub mod error;
pub mod page;
pub mod promo;
pub mod session;
pub mod workflow;

pub use error::WorkflowError;
pub use page::{MoviePage, PageLoad, PageLoader};
pub use promo::{PromoPicker, PromoPrompt};
pub use session::{resolve_session, SessionResolver};
pub use workflow::{FormPhase, ReviewForm, ReviewWorkflow, Submission, MAX_REVIEW_LEN};
