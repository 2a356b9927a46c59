pub mod agent_id;
pub mod delivery_upload;
pub mod validated_form;

pub use agent_id::AgentIdPath;
pub use delivery_upload::DeliveryUpload;
pub use validated_form::ValidatedForm;
