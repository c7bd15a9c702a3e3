pub mod assessments;

pub mod criteria;

pub mod events;

pub mod semesters;

pub use assessments::configure_assessments_routes;
pub use criteria::configure_criteria_routes;
pub use events::configure_events_routes;
pub use semesters::configure_semesters_routes;
