use std::ffi::OsString;
use std::path::Path;

use crate::defaults;
use crate::descriptor::Configurable;
use crate::env::{EnvBinder, Environment, ProcessEnv};
use crate::error::ConfiguratorError;
use crate::file;
use crate::flags::{FlagApplier, FlagRegistry};
use crate::naming;
use crate::ops::{self, ConfigResult};
use crate::types::ConfigAction;

/// Prefix used for environment variables when none is configured.
pub const DEFAULT_ENV_PREFIX: &str = "CONFIGURATOR_";

/// Appended to the prefix to name the config-file-path variable.
pub const CONFIG_LOCATION_SUFFIX: &str = "CONFIG";

/// Populates configuration records and owns the state a population pass
/// needs: the env prefix, the config-file-path variable, the environment
/// source and the flag registry.
///
/// The flag registry outlives a single pass. Running [`initialize`] again,
/// or on another record, re-applies every layer to the fields but never
/// registers a flag name twice.
///
/// [`initialize`]: Configurator::initialize
pub struct Configurator {
    env_prefix: String,
    config_location: String,
    bin_name: String,
    env: Box<dyn Environment>,
    flags: FlagRegistry,
    args: Vec<String>,
}

impl Configurator {
    pub fn builder() -> ConfiguratorBuilder {
        ConfiguratorBuilder::new()
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Change the env prefix.
    ///
    /// The config-file-path variable name is not recomputed; call
    /// [`set_config_location`](Self::set_config_location) too if it should
    /// follow the new prefix.
    pub fn set_env_prefix(&mut self, prefix: &str) {
        self.env_prefix = prefix.to_string();
    }

    /// Name of the environment variable holding the config file path.
    pub fn config_location(&self) -> &str {
        &self.config_location
    }

    pub fn set_config_location(&mut self, var: &str) {
        self.config_location = var.to_string();
    }

    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    /// Positional arguments left over by the last flag parse.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Derive a flag name from an environment-variable key using this
    /// configurator's prefix.
    pub fn form_flag_name(&self, key: &str) -> String {
        naming::form_flag_name(&self.env_prefix, key)
    }

    /// Populate `config` from defaults, the config file, the environment and
    /// the process's command-line arguments, in that order.
    ///
    /// Never fails: every stage that cannot contribute is skipped and the
    /// fields keep what the earlier stages produced. `--help` prints usage
    /// and exits the process.
    pub fn initialize<C: Configurable>(&mut self, config: &mut C) {
        self.initialize_from(config, std::env::args_os());
    }

    /// Like [`initialize`](Self::initialize), parsing `args` (binary name
    /// first) instead of the process arguments.
    pub fn initialize_from<C, I, T>(&mut self, config: &mut C, args: I)
    where
        C: Configurable,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        tracing::debug!(record = std::any::type_name::<C>(), "populating configuration");

        self.set_defaults(config);
        // Failure only means the later stages are the source of truth.
        self.set_from_config_file(config);
        self.set_from_environment(config);

        if let Err(err) = self.parse_flags(config, args) {
            match err {
                ConfiguratorError::Flags(e)
                    if matches!(
                        e.kind(),
                        clap::error::ErrorKind::DisplayHelp
                            | clap::error::ErrorKind::DisplayVersion
                    ) =>
                {
                    e.exit()
                }
                other => tracing::warn!(error = %other, "ignoring command-line flags"),
            }
        }
    }

    /// Write every field's declared default.
    pub fn set_defaults<C: Configurable>(&self, config: &mut C) {
        tracing::debug!("applying defaults");
        defaults::apply_defaults(config);
    }

    /// Read the file named by the config-location variable.
    pub fn load_config_file(&self) -> Result<(std::path::PathBuf, Vec<u8>), ConfiguratorError> {
        file::load_config_file(self.env.as_ref(), &self.config_location)
    }

    /// Overlay the JSON document in `contents` onto `config`.
    pub fn merge_config<C: Configurable>(
        &self,
        path: &Path,
        contents: &[u8],
        config: &mut C,
    ) -> Result<usize, ConfiguratorError> {
        file::merge_json(path, contents, config)
    }

    /// Load and merge the config file. Returns whether the file was applied.
    pub fn set_from_config_file<C: Configurable>(&self, config: &mut C) -> bool {
        let result = self
            .load_config_file()
            .and_then(|(path, contents)| self.merge_config(&path, &contents, config));

        match result {
            Ok(written) => {
                tracing::debug!(fields = written, "applied config file");
                true
            }
            Err(ConfiguratorError::NoConfigPath { var }) => {
                tracing::debug!(var = %var, "no config file configured");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping config file");
                false
            }
        }
    }

    /// Apply environment values and register a flag for every tagged field.
    pub fn set_from_environment<C: Configurable>(&mut self, config: &mut C) {
        let owner = std::any::type_name::<C>();
        let written = EnvBinder {
            prefix: &self.env_prefix,
            owner,
            env: self.env.as_ref(),
            registry: &mut self.flags,
        }
        .bind(config, "");
        tracing::debug!(fields = written, flags = self.flags.len(), "applied environment");
    }

    /// Parse `args` against the registered flags and write the values given
    /// on the command line into `config`.
    ///
    /// Rejected arguments are skipped and a malformed value only leaves its
    /// own field alone. An error (`--help`, or a failure that cannot be tied
    /// to one argument) writes nothing.
    pub fn parse_flags<C, I, T>(&mut self, config: &mut C, args: I) -> Result<(), ConfiguratorError>
    where
        C: Configurable,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = self.flags.parse(&self.bin_name, args)?;
        let written = FlagApplier {
            prefix: &self.env_prefix,
            owner: std::any::type_name::<C>(),
            registry: &self.flags,
            parsed: &parsed,
        }
        .apply(config, "");
        self.args = parsed.remaining().to_vec();
        tracing::debug!(fields = written, "applied command-line flags");
        Ok(())
    }

    /// Handle a `ConfigAction` against an already populated record.
    pub fn handle<C: Configurable>(
        &self,
        action: &ConfigAction,
        config: &mut C,
    ) -> Result<ConfigResult, ConfiguratorError> {
        match action {
            ConfigAction::List => Ok(ops::list_values(config, &self.env_prefix)),
            ConfigAction::Template { output } => {
                let template = ops::generate_template(config)?;
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                            std::fs::create_dir_all(parent).map_err(|e| ConfiguratorError::Io {
                                path: parent.to_path_buf(),
                                source: e,
                            })?;
                        }
                        std::fs::write(path, &template).map_err(|e| ConfiguratorError::Io {
                            path: path.clone(),
                            source: e,
                        })?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
        }
    }
}

impl Default for Configurator {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for a [`Configurator`].
pub struct ConfiguratorBuilder {
    env_prefix: Option<String>,
    config_location: Option<String>,
    bin_name: Option<String>,
    env: Option<Box<dyn Environment>>,
}

impl ConfiguratorBuilder {
    fn new() -> Self {
        Self {
            env_prefix: None,
            config_location: None,
            bin_name: None,
            env: None,
        }
    }

    /// Set the env prefix (default: `CONFIGURATOR_`). It is prepended verbatim,
    /// so include any separator, e.g. `"MYAPP_"`.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override the config-file-path variable (default: `{prefix}CONFIG`).
    pub fn config_location(mut self, var: &str) -> Self {
        self.config_location = Some(var.to_string());
        self
    }

    /// Program name shown in `--help` (default: the crate name).
    pub fn bin_name(mut self, name: &str) -> Self {
        self.bin_name = Some(name.to_string());
        self
    }

    /// Read variables from `env` instead of the process environment.
    pub fn env_source<E: Environment + 'static>(mut self, env: E) -> Self {
        self.env = Some(Box::new(env));
        self
    }

    fn effective_env_prefix(&self) -> String {
        self.env_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_string())
    }

    fn effective_config_location(&self) -> String {
        if let Some(var) = &self.config_location {
            return var.clone();
        }
        format!("{}{CONFIG_LOCATION_SUFFIX}", self.effective_env_prefix())
    }

    fn effective_bin_name(&self) -> String {
        self.bin_name
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    pub fn build(self) -> Configurator {
        Configurator {
            env_prefix: self.effective_env_prefix(),
            config_location: self.effective_config_location(),
            bin_name: self.effective_bin_name(),
            env: self.env.unwrap_or_else(|| Box::new(ProcessEnv)),
            flags: FlagRegistry::new(),
            args: Vec::new(),
        }
    }
}
