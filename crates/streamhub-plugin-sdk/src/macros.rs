//! Export macro emitting the entry symbols the plugin loader expects.

/// Exports a registration function as a loadable StreamHub client script.
///
/// Emits the two symbols the loader resolves: the API version export and the
/// registration entrypoint. The plugin crate must be built as a `cdylib`
/// with the same toolchain as the client.
///
/// # Example
/// ```rust,ignore
/// fn register(registrar: &mut dyn PluginRegistrar) -> anyhow::Result<()> {
///     // register hooks, form fields, settings scripts
///     Ok(())
/// }
///
/// streamhub_plugin_sdk::export_client_script!(register);
/// ```
#[macro_export]
macro_rules! export_client_script {
    ($register:path) => {
        /// Reports the registration API version this plugin was built
        /// against.
        #[unsafe(no_mangle)]
        pub extern "C" fn streamhub_client_api_version() -> u32 {
            $crate::CLIENT_API_VERSION
        }

        /// Registration entrypoint resolved and invoked by the plugin
        /// loader.
        #[unsafe(no_mangle)]
        pub fn streamhub_register_client(
            registrar: &mut dyn $crate::prelude::PluginRegistrar,
        ) -> $crate::anyhow::Result<()> {
            $register(registrar)
        }
    };
}
