use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into a test
const ISOLATED_ENV: &[&str] = &[
    "SUPPORTDESK_ENDPOINT_URL",
    "SUPPORTDESK_ROOT",
    "SUPPORTDESK_LOG",
];

/// Helper struct to run supportdesk commands in an isolated temp directory
pub struct SupportTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl SupportTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        SupportTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_supportdesk").to_string(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary_path);
        command.args(args).current_dir(self.temp_dir.path());
        for var in ISOLATED_ENV {
            command.env_remove(var);
        }
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute supportdesk command")
    }

    #[allow(dead_code)]
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut command = self.command(args);
        command.envs(env.iter().copied());
        command
            .output()
            .expect("Failed to execute supportdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".supportdesk");
        fs::create_dir_all(&dir).expect("Failed to create .supportdesk directory");
        let path = dir.join("config.yaml");
        fs::write(path, content).expect("Failed to write config file");
    }

    #[allow(dead_code)]
    pub fn read_config(&self) -> Option<String> {
        let path = self.temp_dir.path().join(".supportdesk").join("config.yaml");
        fs::read_to_string(path).ok()
    }

    #[allow(dead_code)]
    pub fn write_file(&self, relative_path: &str, content: &[u8]) -> std::path::PathBuf {
        let path = self.temp_dir.path().join(relative_path);
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}
