//! Convenience macros for plugin development.

/// Macro for building a [`PluginInfo`](crate::plugin::PluginInfo).
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "offline",
///     name: "Offline Support",
///     version: "1.0.0",
///     description: "Caches threads and channel lists locally"
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr
    ) => {
        $crate::prelude::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
        }
    };
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr
    ) => {
        $crate::plugin_info!(id: $id, name: $name, version: $version, description: "")
    };
}
