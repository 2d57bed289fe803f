pub mod client;
pub mod envelope;
pub mod request;
pub mod types;

// 重新导出常用类型，方便访问
pub use client::Client;
pub use envelope::Envelope;
pub use request::SubmitRequest;
pub use types::{Artifact, ArtifactRef, PollData, SubmitData};
