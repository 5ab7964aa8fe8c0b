//! Research flow views: search, pain-point report, ideas, build plan.

mod error_panel;
mod idea_card;
mod ideas_view;
mod plan_view;
mod report_view;
mod search_view;

pub use error_panel::ErrorPanel;
pub use idea_card::IdeaCard;
pub use ideas_view::IdeasView;
pub use plan_view::PlanView;
pub use report_view::ReportView;
pub use search_view::SearchView;
