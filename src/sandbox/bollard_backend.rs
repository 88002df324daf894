//! Docker-compatible sandbox backend
//!
//! Grounded on the teacher's `ContainerManager`: one container per sandbox
//! name, resource limits applied via `HostConfig`, wall-clock enforcement
//! via `timeout`, and CPU/memory accounting parsed out of `/usr/bin/time -v`
//! output. Any backend offering equivalent isolation could implement
//! `SandboxBackend` instead of this one.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use bollard::{
    container::LogOutput,
    exec::{CreateExecOptions, StartExecResults},
    models::ContainerCreateBody,
    query_parameters::{CreateContainerOptionsBuilder, RemoveContainerOptionsBuilder},
    Docker,
};
use futures::StreamExt;

use crate::models::ProcessFlag;

use super::backend::{
    validate_sandbox_path, ExecOutcome, ResourceLimits, SandboxBackend, SandboxError,
    SandboxProfile,
};

/// Sandbox backend talking to a local Docker-compatible daemon over bollard.
pub struct BollardSandbox {
    docker: Docker,
}

impl BollardSandbox {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    async fn exec_raw(&self, name: &str, cmd: &str) -> Result<(String, String, i32), SandboxError> {
        let exec = self
            .docker
            .create_exec(
                name,
                CreateExecOptions {
                    cmd: Some(vec!["/bin/sh", "-c", cmd]),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| SandboxError::Io(e.to_string()))?;

        let output = self
            .docker
            .start_exec(&exec.id, None)
            .await
            .map_err(|e| SandboxError::Io(e.to_string()))?;

        let mut stdout = String::new();
        let mut stderr = String::new();

        if let StartExecResults::Attached { mut output, .. } = output {
            while let Some(msg) = output.next().await {
                match msg.map_err(|e| SandboxError::Io(e.to_string()))? {
                    LogOutput::StdOut { message } => {
                        stdout.push_str(&String::from_utf8_lossy(&message));
                    }
                    LogOutput::StdErr { message } => {
                        stderr.push_str(&String::from_utf8_lossy(&message));
                    }
                    _ => {}
                }
            }
        }

        let inspect = self
            .docker
            .inspect_exec(&exec.id)
            .await
            .map_err(|e| SandboxError::Io(e.to_string()))?;
        let exit_code = inspect.exit_code.unwrap_or(-1) as i32;

        Ok((stdout, stderr, exit_code))
    }

    fn parse_memory_kb(time_output: &str) -> i64 {
        for line in time_output.lines() {
            if line.contains("Maximum resident set size") {
                if let Some(kb_str) = line.split(':').nth(1) {
                    if let Ok(kb) = kb_str.trim().parse::<i64>() {
                        return kb;
                    }
                }
            }
        }
        0
    }

    fn parse_cpu_ms(time_output: &str) -> f64 {
        let mut user_time = 0.0f64;
        let mut sys_time = 0.0f64;
        for line in time_output.lines() {
            if line.contains("User time (seconds)") {
                if let Some(v) = line.split(':').nth(1) {
                    user_time = v.trim().parse().unwrap_or(0.0);
                }
            } else if line.contains("System time (seconds)") {
                if let Some(v) = line.split(':').nth(1) {
                    sys_time = v.trim().parse().unwrap_or(0.0);
                }
            }
        }
        (user_time + sys_time) * 1000.0
    }

    /// Peel `/usr/bin/time -v`'s resource report off the tail of the
    /// program's real stderr stream -- `time` always writes its report to
    /// its own stderr after the timed child has already exited, so it's
    /// reliably the suffix, never interleaved with the program's own lines.
    fn split_time_output(stderr_raw: &str) -> (String, String) {
        if let Some(idx) = stderr_raw.find("\tCommand being timed:") {
            let (stderr, time_part) = stderr_raw.split_at(idx);
            (stderr.to_string(), time_part.to_string())
        } else if let Some(idx) = stderr_raw.find("Command exited with non-zero status") {
            let (stderr, time_part) = stderr_raw.split_at(idx);
            (stderr.to_string(), time_part.to_string())
        } else {
            (stderr_raw.to_string(), String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_time_output_separates_program_stderr_from_the_time_report() {
        let stderr_raw = "solution.c:1:1: error: expected expression\n\tCommand being timed: \"/workspace/solution\"\n\tMaximum resident set size (kbytes): 2048\n\tUser time (seconds): 0.01\n\tSystem time (seconds): 0.00\n";
        let (stderr, time_output) = BollardSandbox::split_time_output(stderr_raw);
        assert_eq!(stderr, "solution.c:1:1: error: expected expression\n");
        assert_eq!(BollardSandbox::parse_memory_kb(&time_output), 2048);
        assert_eq!(BollardSandbox::parse_cpu_ms(&time_output), 10.0);
    }

    #[test]
    fn split_time_output_with_no_program_stderr() {
        let stderr_raw = "\tCommand being timed: \"python3 /workspace/solution.py\"\n\tMaximum resident set size (kbytes): 512\n";
        let (stderr, time_output) = BollardSandbox::split_time_output(stderr_raw);
        assert_eq!(stderr, "");
        assert_eq!(BollardSandbox::parse_memory_kb(&time_output), 512);
    }
}

#[async_trait]
impl SandboxBackend for BollardSandbox {
    async fn launch(&self, name: &str, profile: &SandboxProfile) -> Result<(), SandboxError> {
        let options = CreateContainerOptionsBuilder::default().name(name).build();

        let host_config = bollard::models::HostConfig {
            memory: Some((profile.memory_limit_mb * 1024 * 1024) as i64),
            memory_swap: Some((profile.memory_limit_mb * 1024 * 1024) as i64),
            cpu_period: Some(100_000),
            cpu_quota: Some((profile.cpu_quota * 100_000.0) as i64),
            network_mode: Some("none".to_string()),
            pids_limit: Some(crate::constants::SANDBOX_PIDS_LIMIT),
            ..Default::default()
        };

        let config = ContainerCreateBody {
            image: Some(profile.image.clone()),
            tty: Some(true),
            open_stdin: Some(true),
            host_config: Some(host_config),
            working_dir: Some("/workspace".to_string()),
            env: Some(vec!["LANG=C.UTF-8".to_string()]),
            labels: Some({
                let mut labels = HashMap::new();
                labels.insert("judgecore.sandbox".to_string(), name.to_string());
                labels
            }),
            ..Default::default()
        };

        let container = self
            .docker
            .create_container(Some(options), config)
            .await
            .map_err(|e| match e {
                bollard::errors::Error::DockerResponseServerError { status_code, .. }
                    if status_code == 404 =>
                {
                    SandboxError::ImageMissing(profile.image.clone())
                }
                other => SandboxError::BackendUnavailable(other.to_string()),
            })?;

        self.docker
            .start_container(
                &container.id,
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await
            .map_err(|e| SandboxError::BackendUnavailable(e.to_string()))?;

        Ok(())
    }

    async fn exec(
        &self,
        name: &str,
        argv: &[&str],
        limits: &ResourceLimits,
    ) -> Result<ExecOutcome, SandboxError> {
        if let Some(stdin) = &limits.stdin {
            self.push_bytes(name, "/workspace/input.txt", stdin.as_bytes())
                .await?;
        }

        let grace_secs = limits.wall_timeout.as_secs_f64() * crate::constants::TIMEOUT_GRACE_MULTIPLIER;
        let redirect = if limits.stdin.is_some() {
            " < /workspace/input.txt"
        } else {
            ""
        };
        // No `2>&1` here: the program's own stdout/stderr stay on their own
        // streams (bollard already demultiplexes them in `exec_raw`).
        // `/usr/bin/time -v`'s resource report is written to *its* stderr
        // after the child exits, so it lands after the program's own stderr
        // in that same stream -- `split_time_output` peels it back off.
        let cmd = format!("timeout {grace_secs}s /usr/bin/time -v {}{redirect}", argv.join(" "));

        let start = std::time::Instant::now();
        let (mut stdout, stderr_raw, exit_code) = self.exec_raw(name, &cmd).await?;
        let wall_ms = start.elapsed().as_secs_f64() * 1000.0;

        let (stderr, time_output) = Self::split_time_output(&stderr_raw);
        let mem_kb = Self::parse_memory_kb(&time_output);
        let cpu_ms = Self::parse_cpu_ms(&time_output);

        let mut flag = None;
        if exit_code == 124 || wall_ms > limits.wall_timeout.as_secs_f64() * 1000.0 {
            flag = Some(ProcessFlag::Timeout);
        } else if mem_kb as u64 > limits.memory_limit_kb {
            flag = Some(ProcessFlag::OutOfMemory);
        } else if exit_code < 0 {
            flag = Some(ProcessFlag::SignalKilled);
        } else if exit_code != 0 {
            flag = Some(ProcessFlag::NonZeroExit);
        }

        if stdout.len() > limits.max_output_bytes {
            stdout.truncate(limits.max_output_bytes);
            if flag.is_none() {
                flag = Some(ProcessFlag::OutputTruncated);
            }
        }

        Ok(ExecOutcome {
            stdout,
            stderr,
            exit_status: Some(exit_code),
            wall_ms,
            cpu_ms,
            mem_kb,
            flag,
        })
    }

    async fn push(
        &self,
        name: &str,
        host_path: &Path,
        sandbox_path: &str,
    ) -> Result<(), SandboxError> {
        let content = tokio::fs::read(host_path)
            .await
            .map_err(|e| SandboxError::Io(e.to_string()))?;
        self.push_bytes(name, sandbox_path, &content).await
    }

    async fn push_bytes(
        &self,
        name: &str,
        sandbox_path: &str,
        content: &[u8],
    ) -> Result<(), SandboxError> {
        validate_sandbox_path(sandbox_path)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(content);
        let path = if sandbox_path.starts_with('/') {
            sandbox_path.to_string()
        } else {
            format!("/workspace/{sandbox_path}")
        };
        let cmd = format!("echo '{encoded}' | base64 -d > {path}");
        let (_, stderr, exit_code) = self.exec_raw(name, &cmd).await?;
        if exit_code != 0 {
            return Err(SandboxError::Io(format!(
                "failed to stage {sandbox_path}: {stderr}"
            )));
        }
        Ok(())
    }

    async fn remove(&self, name: &str, sandbox_path: &str) -> Result<(), SandboxError> {
        validate_sandbox_path(sandbox_path)?;
        let path = if sandbox_path.starts_with('/') {
            sandbox_path.to_string()
        } else {
            format!("/workspace/{sandbox_path}")
        };
        let (_, _, _) = self.exec_raw(name, &format!("rm -f {path}")).await?;
        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<(), SandboxError> {
        self.docker
            .stop_container(name, None::<bollard::query_parameters::StopContainerOptions>)
            .await
            .map_err(|e| SandboxError::BackendUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), SandboxError> {
        let options = RemoveContainerOptionsBuilder::default().force(true).build();
        self.docker
            .remove_container(name, Some(options))
            .await
            .map_err(|e| SandboxError::BackendUnavailable(e.to_string()))?;
        Ok(())
    }
}
