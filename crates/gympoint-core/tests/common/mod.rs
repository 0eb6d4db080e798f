//! Common test utilities for gympoint-core integration tests

pub mod mock_repos;
pub mod recording_notifier;

#[allow(unused_imports)]
pub use mock_repos::MockStore;
#[allow(unused_imports)]
pub use recording_notifier::RecordingNotifier;
