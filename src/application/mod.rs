//! Application layer - the session engine and the concrete workflows.

pub mod engine;
pub mod workflows;

pub use engine::{AccessGate, SessionEngine, SessionTimer, StepOutcome, WorkflowSteps};
pub use workflows::{
    AdminPanelWorkflow, BrowseCatalogWorkflow, DispatchContext, EditCatalogWorkflow,
    EditDossierWorkflow, OnboardWorkflow, ViewDossierWorkflow,
};
