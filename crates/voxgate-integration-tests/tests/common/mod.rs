//! Shared harness: a scripted stand-in for the `openclaw` CLI.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use voxgate_bridge::{BridgeConfig, OpenClawBridge, OperationTimeouts};
use voxgate_core::ExecutionPolicy;
use voxgate_orchestrator::VoiceOrchestrator;
use voxgate_workspace::WorkspaceRegistry;

pub const GATEWAY_URL: &str = "ws://127.0.0.1:18789";

/// Mimics the gateway CLI: banner noise around JSON, ANSI-colored text,
/// a failing `nodes status`, and an agent that crashes on request.
const FAKE_GATEWAY: &str = r#"
printf '%s\n' "$*" >> "$(dirname "$0")/invocations.log"
case "$1" in
  agent)
    case "$5" in
      *explode*) echo "agent process crashed" >&2; exit 3 ;;
    esac
    echo "[plugins] voicecall: loaded"
    printf '{"response":"done: %s","toolSummary":"fs.read","session":"%s"}\n' "$5" "$3"
    echo "Run finished."
    ;;
  gateway)
    echo "Gateway OK ($OPENCLAW_GATEWAY_URL)"
    ;;
  status)
    printf '\033[32mgateway running\033[0m\n'
    ;;
  plugins)
    echo "voicecall (enabled)"
    ;;
  nodes)
    echo "nodes service unavailable" >&2
    exit 1
    ;;
  voicecall)
    case "$2" in
      status)
        if [ "$4" = "CA100" ]; then
          echo '{"found":true,"call":{"callId":"CA100","state":"active"}}'
        else
          echo '{"found":false}'
        fi
        ;;
      end) echo "call $4 ended" ;;
    esac
    ;;
  approvals)
    case "$2" in
      get) echo "allowlist: git *" ;;
      allowlist) echo "allowlist $3 $6 (agent $5)" ;;
    esac
    ;;
  *)
    echo "unknown command: $1" >&2
    exit 64
    ;;
esac
"#;

/// A temp directory holding the fake CLI and two workspaces.
pub struct FakeGateway {
    dir: TempDir,
    binary: PathBuf,
}

impl FakeGateway {
    pub fn new() -> Self {
        voxgate_test::init_test_logging();
        let dir = TempDir::new().expect("failed to create tempdir");
        let binary = dir.path().join("openclaw");
        std::fs::write(&binary, format!("#!/bin/sh\n{FAKE_GATEWAY}")).expect("write script");
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");

        for ws in ["web", "api"] {
            std::fs::create_dir_all(dir.path().join("host").join(ws)).expect("create workspace");
        }
        Self { dir, binary }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn host_path(&self, workspace: &str) -> PathBuf {
        self.root().join("host").join(workspace)
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::new(self.binary.to_string_lossy(), GATEWAY_URL)
            .with_token("test-token")
            .with_retries(0)
            .with_timeouts(OperationTimeouts::uniform(Duration::from_secs(10)))
    }

    pub fn bridge(&self) -> Arc<OpenClawBridge> {
        Arc::new(OpenClawBridge::new(self.bridge_config()).expect("valid bridge config"))
    }

    /// Workspaces JSON in the legacy key style.
    pub fn workspaces_json(&self) -> String {
        serde_json::json!({
            "workspaces": [
                {
                    "id": "web",
                    "windowsPath": self.host_path("web"),
                    "wslPath": "/mnt/c/dev/web",
                    "defaultSessionKey": "agent:web",
                    "ideProfile": "zed"
                },
                {
                    "id": "api",
                    "windowsPath": self.host_path("api"),
                    "wslPath": "/mnt/c/dev/api",
                    "defaultSessionKey": "agent:api"
                }
            ]
        })
        .to_string()
    }

    pub fn write_workspaces(&self) -> PathBuf {
        let path = self.root().join("workspaces.json");
        std::fs::write(&path, self.workspaces_json()).expect("write workspaces");
        path
    }

    pub fn registry(&self) -> WorkspaceRegistry {
        WorkspaceRegistry::load(self.write_workspaces()).expect("valid workspaces")
    }

    pub fn orchestrator(&self, policy: &ExecutionPolicy) -> VoiceOrchestrator<OpenClawBridge> {
        VoiceOrchestrator::new(self.bridge(), self.registry(), policy)
            .expect("valid policy")
            .with_gateway(GATEWAY_URL, Some("test-token".to_string()))
    }

    /// Every argv the fake CLI saw, one space-joined line per run.
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.root().join("invocations.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
