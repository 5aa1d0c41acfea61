//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that pluggable backends implement
//! to register themselves with their configuration name and factory
//! function.

/// Base trait for implementation registries.
///
/// Each backend module (currently the storage backends) provides a
/// Registry struct implementing this trait, so that every implementation
/// declares the name it is selected by in configuration and a factory to
/// construct it.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// This should match the key used in the TOML configuration, for example
	/// "memory" for storage.implementations.memory.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
