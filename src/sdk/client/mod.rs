pub mod event_loop;
pub mod notify;
pub mod panel;
pub mod session;

pub use event_loop::{run_interactive, split_query};
pub use notify::{ConsoleNotifier, Notifier};
pub use panel::{ResultsPanel, SummaryBlock};
pub use session::{LookupError, MapClient, RenderOutcome, Ticket};
