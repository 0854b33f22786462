//! The `Vagrant` façade: typed operations over the vagrant CLI.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::adapters::live::runner::LiveCommandRunner;
use crate::error::{Error, ExitError, Result};
use crate::machine::{
    parse_machine_readable, pluck_entry_data, MachineState, MachineStatus, OutputEntry,
};
use crate::plugin::{extract_plugin, Plugin, NO_PLUGINS_SENTINEL};
use crate::ports::runner::CommandRunner;

/// Default name of the vagrant executable.
pub const DEFAULT_BINARY: &str = "vagrant";

/// Runs vagrant subcommands and decodes their output.
///
/// Every method is an independent request/response cycle: build the argument
/// list, run it through the [`CommandRunner`], then parse what came back.
pub struct Vagrant {
    executable: String,
    runner: Box<dyn CommandRunner>,
}

impl Vagrant {
    /// Creates a façade that sends commands through `runner`.
    #[must_use]
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { executable: DEFAULT_BINARY.to_string(), runner }
    }

    /// Creates a façade running the real `vagrant` binary inside `dir`.
    ///
    /// `dir` should contain the Vagrantfile; an empty path means the
    /// current directory.
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(LiveCommandRunner::in_dir(dir)))
    }

    /// Overrides the executable name or path.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Executable the façade invokes.
    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Creates and configures guest machines according to the Vagrantfile.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if `vagrant up` fails.
    pub fn up(&self) -> Result<()> {
        tracing::info!("Starting vagrant environment");
        self.exec_log_output(&["up"])
    }

    /// Gracefully shuts down the guest machines.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if `vagrant halt` fails.
    pub fn halt(&self) -> Result<()> {
        tracing::info!("Stopping vagrant machines");
        self.exec_log_output(&["halt"])
    }

    /// Stops the guest machines and destroys their resources.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if `vagrant destroy` fails.
    pub fn destroy(&self) -> Result<()> {
        tracing::info!("Deleting vagrant machines");
        self.exec_log_output(&["destroy", "--force"])
    }

    /// Reports the status of every machine, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns the runner's error, or [`Error::Parse`] if the output is
    /// malformed.
    pub fn status(&self) -> Result<Vec<MachineStatus>> {
        let out = self.exec(&["status", "--machine-readable"])?;
        let entries = parse_machine_readable(&String::from_utf8_lossy(&out))?;

        let mut statuses: BTreeMap<&str, MachineStatus> = BTreeMap::new();
        for entry in &entries {
            // global messages have no target
            if entry.target.is_empty() {
                continue;
            }

            let status = statuses.entry(entry.target.as_str()).or_insert_with(|| MachineStatus {
                name: entry.target.clone(),
                ..MachineStatus::default()
            });

            match entry.kind.as_str() {
                "provider-name" => status.provider = required_data(entry)?.to_string(),
                "state" => status.state = MachineState::from_token(required_data(entry)?),
                _ => {}
            }
        }

        Ok(statuses.into_values().collect())
    }

    /// Returns the installed vagrant version.
    ///
    /// # Errors
    ///
    /// Returns the runner's error, or an error if the output has no
    /// `version-installed` entry.
    pub fn version(&self) -> Result<String> {
        let out = self.exec(&["version", "--machine-readable"])?;
        let entries = parse_machine_readable(&String::from_utf8_lossy(&out))?;
        let data = pluck_entry_data(&entries, "version-installed")?;
        data.first()
            .cloned()
            .ok_or_else(|| Error::Parse("version-installed entry has no data".to_string()))
    }

    /// Runs `command` on a machine over SSH and returns its output.
    ///
    /// `machine` may be `None` when the Vagrantfile defines a single machine.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if the SSH command fails.
    pub fn ssh(&self, machine: Option<&str>, command: &str) -> Result<String> {
        let mut args = vec!["ssh", "--no-tty", "--command", command];
        if let Some(name) = machine.filter(|name| !name.is_empty()) {
            args.push(name);
        }

        let out = self.exec(&args)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Lists installed plugins with their versions and install locations.
    ///
    /// # Errors
    ///
    /// Returns the runner's error, or [`Error::Parse`] if the output is
    /// malformed.
    pub fn plugin_list(&self) -> Result<Vec<Plugin>> {
        let out = self.exec(&["plugin", "list", "--machine-readable"])?;
        let entries = parse_machine_readable(&String::from_utf8_lossy(&out))?;

        let mut plugins = Vec::new();
        // ui data is `<level>,<message>`; the message combines name, version and location
        for entry in entries.iter().filter(|entry| entry.kind == "ui") {
            let Some(text) = entry.data.get(1) else { continue };
            if text.contains(NO_PLUGINS_SENTINEL) {
                break;
            }
            plugins.extend(extract_plugin(text));
        }
        Ok(plugins)
    }

    /// Installs a plugin by name or local gem path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without running anything if the plugin
    /// has no name, otherwise the runner's error.
    pub fn plugin_install(&self, plugin: &Plugin) -> Result<()> {
        if plugin.name.is_empty() {
            return Err(Error::Validation("plugin must have a name".to_string()));
        }

        let mut args = vec!["plugin", "install", plugin.name.as_str()];
        if let Some(version) = plugin.version.as_deref().filter(|v| !v.is_empty()) {
            args.extend(["--plugin-version", version]);
        }
        if plugin.is_local() {
            args.push("--local");
        }

        tracing::info!(plugin = %plugin.name, "Installing vagrant plugin");
        self.exec_log_output(&args)
    }

    fn exec(&self, args: &[&str]) -> Result<Vec<u8>> {
        let full_cmd = format!("{} {}", self.executable, args.join(" "));
        tracing::debug!(command = %full_cmd, "Running command");
        let result = self.runner.execute(&self.executable, args);
        let out = match &result {
            Ok(out) => Some(out.as_slice()),
            Err(err) => err.as_exit().map(ExitError::stdout),
        };
        if let Some(out) = out {
            let output = String::from_utf8_lossy(out);
            tracing::debug!(command = %full_cmd, %output, "Command output");
        }
        result
    }

    /// Runs a command whose output is only of interest to the log.
    fn exec_log_output(&self, args: &[&str]) -> Result<()> {
        let out = self.exec(args)?;
        if !out.is_empty() {
            tracing::info!("{}", String::from_utf8_lossy(&out).trim_end());
        }
        Ok(())
    }
}

fn required_data(entry: &OutputEntry) -> Result<&str> {
    entry.first_data().ok_or_else(|| {
        Error::Parse(format!("{} entry for {} has no data", entry.kind, entry.target))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    type Call = (String, Vec<String>);

    /// Records every invocation and answers with queued responses.
    #[derive(Clone, Default)]
    struct SpyRunner {
        calls: Arc<Mutex<Vec<Call>>>,
        responses: Arc<Mutex<VecDeque<Result<Vec<u8>>>>>,
    }

    impl SpyRunner {
        fn returning(response: Result<Vec<u8>>) -> Self {
            let spy = Self::default();
            spy.responses.lock().unwrap().push_back(response);
            spy
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for SpyRunner {
        fn execute(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.iter().map(ToString::to_string).collect()));
            self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn vagrant_with(response: Result<Vec<u8>>) -> (Vagrant, SpyRunner) {
        let spy = SpyRunner::returning(response);
        (Vagrant::new(Box::new(spy.clone())), spy)
    }

    fn ok(out: &str) -> Result<Vec<u8>> {
        Ok(out.as_bytes().to_vec())
    }

    fn exit_failure() -> Result<Vec<u8>> {
        Err(ExitError::new("vagrant", 1, "something went wrong\n", Vec::new()).into())
    }

    fn assert_called_with(spy: &SpyRunner, args: &[&str]) {
        let expected: Vec<String> = args.iter().map(ToString::to_string).collect();
        assert_eq!(spy.calls(), vec![("vagrant".to_string(), expected)]);
    }

    #[test]
    fn lifecycle_commands_use_expected_args() {
        let cases: [(fn(&Vagrant) -> Result<()>, &[&str]); 3] = [
            (Vagrant::up, &["up"]),
            (Vagrant::halt, &["halt"]),
            (Vagrant::destroy, &["destroy", "--force"]),
        ];
        for (op, args) in cases {
            let (vagrant, spy) = vagrant_with(ok("output"));
            assert!(op(&vagrant).is_ok());
            assert_called_with(&spy, args);
        }
    }

    #[test]
    fn lifecycle_commands_propagate_errors() {
        for op in [Vagrant::up, Vagrant::halt, Vagrant::destroy] {
            let (vagrant, _) = vagrant_with(exit_failure());
            let err = op(&vagrant).unwrap_err();
            assert_eq!(err.as_exit().map(ExitError::status), Some(1));
        }
    }

    #[test]
    fn status_single_machine() {
        let (vagrant, spy) = vagrant_with(ok(include_str!("../tests/fixtures/status-single")));

        let statuses = vagrant.status().unwrap();

        assert_called_with(&spy, &["status", "--machine-readable"]);
        assert_eq!(
            statuses,
            vec![MachineStatus {
                name: "srv-1".into(),
                provider: "virtualbox".into(),
                state: MachineState::NotCreated,
            }]
        );
    }

    #[test]
    fn status_minimal_pair_yields_one_record() {
        let (vagrant, _) =
            vagrant_with(ok("t1,srv-1,provider-name,virtualbox\nt1,srv-1,state,not_created\n"));
        let statuses = vagrant.status().unwrap();
        assert_eq!(
            statuses,
            vec![MachineStatus {
                name: "srv-1".into(),
                provider: "virtualbox".into(),
                state: MachineState::NotCreated,
            }]
        );
    }

    #[test]
    fn status_multiple_machines_sorted_without_cross_talk() {
        let (vagrant, _) = vagrant_with(ok(include_str!("../tests/fixtures/status-multiple")));

        let statuses = vagrant.status().unwrap();

        assert_eq!(
            statuses,
            vec![
                MachineStatus {
                    name: "srv-1".into(),
                    provider: "virtualbox".into(),
                    state: MachineState::Running,
                },
                MachineStatus {
                    name: "srv-2".into(),
                    provider: "virtualbox".into(),
                    state: MachineState::PowerOff,
                },
            ]
        );
    }

    #[test]
    fn status_interleaved_targets_stay_separate() {
        let out = "1,web,state,running\n\
                   1,db,provider-name,docker\n\
                   1,web,provider-name,libvirt\n\
                   1,db,state,stopping\n";
        let (vagrant, _) = vagrant_with(ok(out));

        let statuses = vagrant.status().unwrap();

        assert_eq!(statuses.len(), 2);
        assert_eq!((statuses[0].name.as_str(), statuses[0].provider.as_str()), ("db", "docker"));
        assert_eq!(statuses[0].state, MachineState::Stopping);
        assert_eq!((statuses[1].name.as_str(), statuses[1].provider.as_str()), ("web", "libvirt"));
        assert!(statuses[1].state.is_running());
    }

    #[test]
    fn status_ignores_global_entries() {
        let (vagrant, _) = vagrant_with(ok("1,,state,running\n1,,provider-name,virtualbox\n"));
        assert!(vagrant.status().unwrap().is_empty());
    }

    #[test]
    fn status_state_without_data_is_parse_error() {
        let (vagrant, _) = vagrant_with(ok("1,srv-1,state\n"));
        assert!(matches!(vagrant.status().unwrap_err(), Error::Parse(_)));
    }

    #[test]
    fn status_propagates_runner_error() {
        let (vagrant, _) = vagrant_with(exit_failure());
        assert!(vagrant.status().is_err());
    }

    #[test]
    fn version_success() {
        let (vagrant, spy) = vagrant_with(ok(include_str!("../tests/fixtures/version")));
        assert_eq!(vagrant.version().unwrap(), "2.2.5");
        assert_called_with(&spy, &["version", "--machine-readable"]);
    }

    #[test]
    fn version_single_line() {
        let (vagrant, _) = vagrant_with(ok("1565121095,,version-installed,2.2.5"));
        assert_eq!(vagrant.version().unwrap(), "2.2.5");
    }

    #[test]
    fn version_bad_output() {
        let (vagrant, _) = vagrant_with(ok("bad output"));
        let err = vagrant.version().unwrap_err();
        assert!(err.to_string().starts_with("invalid format"));
    }

    #[test]
    fn version_missing_entry_is_error() {
        let (vagrant, _) = vagrant_with(ok("1565121095,,version-latest,2.3.0\n"));
        assert!(matches!(vagrant.version().unwrap_err(), Error::MissingEntry(_)));
    }

    #[test]
    fn version_entry_without_data_is_error() {
        let (vagrant, _) = vagrant_with(ok("1565121095,,version-installed\n"));
        assert!(vagrant.version().is_err());
    }

    #[test]
    fn ssh_without_machine() {
        let (vagrant, spy) = vagrant_with(ok("command output"));
        assert_eq!(vagrant.ssh(None, "my-command 1 2 3").unwrap(), "command output");
        assert_called_with(&spy, &["ssh", "--no-tty", "--command", "my-command 1 2 3"]);
    }

    #[test]
    fn ssh_with_machine() {
        let (vagrant, spy) = vagrant_with(ok(""));
        vagrant.ssh(Some("srv-2"), "uptime").unwrap();
        assert_called_with(&spy, &["ssh", "--no-tty", "--command", "uptime", "srv-2"]);
    }

    #[test]
    fn ssh_propagates_runner_error() {
        let (vagrant, _) = vagrant_with(exit_failure());
        assert!(vagrant.ssh(None, "uptime").is_err());
    }

    #[test]
    fn plugin_list_success() {
        let (vagrant, spy) = vagrant_with(ok(include_str!("../tests/fixtures/plugin-list")));

        let plugins = vagrant.plugin_list().unwrap();

        assert_called_with(&spy, &["plugin", "list", "--machine-readable"]);
        assert_eq!(
            plugins,
            vec![
                Plugin::named("vagrant-disksize").with_version("0.1.3").with_location("global"),
                Plugin::named("vagrant-ip-show").with_version("0.0.4").with_location("global"),
            ]
        );
    }

    #[test]
    fn plugin_list_none_installed() {
        let (vagrant, _) = vagrant_with(ok(include_str!("../tests/fixtures/plugin-list-empty")));
        assert!(vagrant.plugin_list().unwrap().is_empty());
    }

    /// Shared buffer the fmt subscriber writes log lines into.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_command_output_is_logged_at_debug() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let (vagrant, _) = vagrant_with(Err(ExitError::new(
            "vagrant",
            1,
            "VM is locked",
            b"Bringing machine 'web' up...".to_vec(),
        )
        .into()));
        let result = tracing::subscriber::with_default(subscriber, || vagrant.halt());

        assert!(result.is_err());
        let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("Bringing machine 'web' up..."), "logs: {logged}");
    }

    #[test]
    fn plugin_list_stops_at_no_plugins_message() {
        let out = "1,,ui,info,No plugins installed.\n\
                   1,,ui,info,vagrant-disksize (0.1.3%!(VAGRANT_COMMA) global)\n";
        let (vagrant, _) = vagrant_with(ok(out));
        assert!(vagrant.plugin_list().unwrap().is_empty());
    }

    #[test]
    fn plugin_list_skips_ui_entries_without_text() {
        let out = "1,,ui,info\n\
                   1,,ui\n\
                   1,,ui,info,vagrant-ip-show (0.0.4%!(VAGRANT_COMMA) global)\n";
        let (vagrant, _) = vagrant_with(ok(out));
        assert_eq!(
            vagrant.plugin_list().unwrap(),
            vec![Plugin::named("vagrant-ip-show").with_version("0.0.4").with_location("global")]
        );
    }

    #[test]
    fn plugin_list_propagates_runner_error() {
        let (vagrant, _) = vagrant_with(exit_failure());
        assert!(vagrant.plugin_list().is_err());
    }

    #[test]
    fn plugin_install_requires_name() {
        let (vagrant, spy) = vagrant_with(ok(""));
        let err = vagrant.plugin_install(&Plugin::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(spy.calls().is_empty());
    }

    #[test]
    fn plugin_install_args() {
        let cases = [
            (Plugin::named("vagrant-disksize"), vec!["plugin", "install", "vagrant-disksize"]),
            (
                Plugin::named("vagrant-disksize").with_version("0.1.3"),
                vec!["plugin", "install", "vagrant-disksize", "--plugin-version", "0.1.3"],
            ),
            (
                Plugin::named("vagrant-disksize").with_location("local"),
                vec!["plugin", "install", "vagrant-disksize", "--local"],
            ),
            (
                Plugin::named("vagrant-disksize").with_version("0.1.3").with_location("local"),
                vec![
                    "plugin",
                    "install",
                    "vagrant-disksize",
                    "--plugin-version",
                    "0.1.3",
                    "--local",
                ],
            ),
            (
                Plugin::named("vagrant-disksize").with_location("global"),
                vec!["plugin", "install", "vagrant-disksize"],
            ),
        ];
        for (plugin, args) in cases {
            let (vagrant, spy) = vagrant_with(ok("Installed the plugin"));
            vagrant.plugin_install(&plugin).unwrap();
            assert_called_with(&spy, &args);
        }
    }

    #[test]
    fn plugin_install_propagates_runner_error() {
        let (vagrant, _) = vagrant_with(exit_failure());
        assert!(vagrant.plugin_install(&Plugin::named("vagrant-disksize")).is_err());
    }

    #[test]
    fn custom_executable_is_invoked() {
        let spy = SpyRunner::returning(ok("1,,version-installed,2.4.0\n"));
        let vagrant =
            Vagrant::new(Box::new(spy.clone())).with_executable("/opt/vagrant/bin/vagrant");
        vagrant.version().unwrap();
        assert_eq!(spy.calls()[0].0, "/opt/vagrant/bin/vagrant");
    }
}
