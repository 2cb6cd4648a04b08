pub mod directory;
pub mod ledger;
pub mod pricing;
pub mod workflow;

pub use directory::{CollectionDirectory, DirectoryError, FlightDirectory};
pub use ledger::BookingLedger;
pub use pricing::{Fare, FareCalculator};
pub use workflow::{BookingWorkflow, Step, WorkflowError};
