pub const BINARY_NAME: &str = "ollama";
pub const SERVE_SUBCOMMAND: &str = "serve";

pub const SERVICE_ACCOUNT: &str = "ollama";
pub const SERVICE_HOME: &str = "/usr/share/ollama";
/// Unit name as passed to systemctl. Coincides with the account name but is
/// a separate concept.
pub const SERVICE_UNIT: &str = "ollama";
pub const UNIT_PATH: &str = "/etc/systemd/system/ollama.service";
pub const API_ENDPOINT: &str = "http://127.0.0.1:11434";

/// Groups gating accelerator device nodes. Hosts expose different subsets.
pub const DEVICE_GROUPS: &[&str] = &["render", "video"];

pub const BINDIR_CANDIDATES: &[&str] = &["/usr/local/bin", "/usr/bin", "/bin"];

/// Library directories searched under the source root, in order.
pub const SOURCE_LIB_DIRS: &[&str] = &["dist/lib/ollama", "lib/ollama"];

pub const REQUIRED_TOOLS: &[&str] = &["install", "cp", "rm", "ln", "useradd", "usermod"];
