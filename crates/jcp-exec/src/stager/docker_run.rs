use std::fmt::Write as _;

use jcp_model::DockerRunSpec;

/// Renders a [`DockerRunSpec`] into a `docker run` command line and env-file text.
///
/// Flag order is fixed so the same spec always yields byte-identical output.
/// Values are written verbatim.
#[derive(Debug, Clone, Copy)]
pub struct DockerRunCmd<'a> {
    spec: &'a DockerRunSpec,
}

impl<'a> DockerRunCmd<'a> {
    pub fn new(spec: &'a DockerRunSpec) -> Self {
        Self { spec }
    }

    /// `(command_text, env_file_text)`.
    pub fn render(&self) -> (String, String) {
        (self.command_text(), self.env_file_text())
    }

    pub fn command_text(&self) -> String {
        let s = self.spec;
        let mut out = String::from("docker run");

        flag(&mut out, "--name", &s.name);
        flag(&mut out, "--user", &s.user);
        flag(&mut out, "--cidfile", &s.cid_file);
        flag(&mut out, "--env-file", &s.env_file);
        if s.remove_on_exit.is_enabled() {
            out.push_str(" --rm");
        }

        opt(&mut out, "--addhost", &s.add_host);
        opt(&mut out, "--cpus", &s.cpus);
        opt(&mut out, "--cpuset-cpus", &s.cpuset_cpus);
        opt(&mut out, "--cpuset-mems", &s.cpuset_mems);
        opt(&mut out, "--gpus", &s.gpus);
        for group in &s.groups {
            flag(&mut out, "--group-add", group);
        }
        opt(&mut out, "--hostname", &s.hostname);
        opt(&mut out, "--ip", &s.ip);
        opt(&mut out, "--ip6", &s.ip6);
        for (k, v) in s.labels.iter() {
            let _ = write!(out, " --label {k}={v}");
        }
        opt(&mut out, "--log-driver", &s.log_driver);
        opt(&mut out, "--log-opt", &s.log_opts);
        opt(&mut out, "--memory", &s.memory);
        opt(&mut out, "--network", &s.network);
        opt(&mut out, "--network-alias", &s.network_alias);
        for port in &s.port_mappings {
            flag(&mut out, "-p", port);
        }
        opt(&mut out, "--workdir", &s.workdir);

        for mount in &s.mounts {
            let _ = write!(out, " --mount {mount}");
        }
        for tmpfs in &s.tmpfs {
            flag(&mut out, "--tmpfs", tmpfs);
        }
        for volume in &s.volumes {
            flag(&mut out, "--volume", volume);
        }

        out.push(' ');
        out.push_str(&s.image);
        if !s.app_args.trim().is_empty() {
            out.push_str(&s.app_args);
        }
        out
    }

    /// One `KEY=VALUE` line per variable, or a bare `KEY` when the value is empty.
    pub fn env_file_text(&self) -> String {
        let mut out = String::new();
        for var in self.spec.env.iter() {
            match var.value() {
                Some(v) => {
                    let _ = writeln!(out, "{}={v}", var.key());
                }
                None => {
                    let _ = writeln!(out, "{}", var.key());
                }
            }
        }
        out
    }
}

fn flag(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name} {value}");
}

fn opt(out: &mut String, name: &str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        flag(out, name, v);
    }
}

#[cfg(test)]
mod tests {
    use jcp_model::{Env, Flag, Labels, Mount};

    use super::*;

    fn minimal() -> DockerRunSpec {
        DockerRunSpec {
            name: "job-1".into(),
            user: "1000:1000".into(),
            cid_file: "/exec/job-1.cid".into(),
            env_file: "/exec/job.env".into(),
            image: "alpine:3".into(),
            ..Default::default()
        }
    }

    #[test]
    fn service_managed_flags_come_first() {
        let spec = minimal();
        assert_eq!(
            DockerRunCmd::new(&spec).command_text(),
            "docker run --name job-1 --user 1000:1000 --cidfile /exec/job-1.cid \
             --env-file /exec/job.env --rm alpine:3"
        );

        let mut keep = minimal();
        keep.remove_on_exit = Flag::disabled();
        keep.app_args = "   ".into();
        assert!(!DockerRunCmd::new(&keep).command_text().contains("--rm"));
        assert!(DockerRunCmd::new(&keep).command_text().ends_with(" alpine:3"));
    }

    #[test]
    fn full_flag_order() {
        let mut labels = Labels::new();
        labels.insert("team", "hpc").insert("app", "sim");

        let spec = DockerRunSpec {
            add_host: Some("db:10.0.0.5".into()),
            cpus: Some("2".into()),
            cpuset_cpus: Some("0-1".into()),
            cpuset_mems: Some("0".into()),
            gpus: Some("all".into()),
            groups: vec!["video".into(), "render".into()],
            hostname: Some("worker".into()),
            ip: Some("172.18.0.4".into()),
            ip6: Some("fd00::4".into()),
            labels,
            log_driver: Some("json-file".into()),
            log_opts: Some("max-size=10m".into()),
            memory: Some("4g".into()),
            network: Some("jobs".into()),
            network_alias: Some("sim".into()),
            port_mappings: vec!["8080:80".into(), "9090:90".into()],
            workdir: Some("/JobExec".into()),
            mounts: vec![
                Mount::bind("/in", "/JobInput", true),
                Mount::volume("cache", "/cache", false),
            ],
            tmpfs: vec!["/run".into()],
            volumes: vec!["/data:/data".into()],
            app_args: " -n 4 --verbose".into(),
            ..minimal()
        };

        let expected = [
            "docker run",
            "--name job-1",
            "--user 1000:1000",
            "--cidfile /exec/job-1.cid",
            "--env-file /exec/job.env",
            "--rm",
            "--addhost db:10.0.0.5",
            "--cpus 2",
            "--cpuset-cpus 0-1",
            "--cpuset-mems 0",
            "--gpus all",
            "--group-add video",
            "--group-add render",
            "--hostname worker",
            "--ip 172.18.0.4",
            "--ip6 fd00::4",
            "--label app=sim",
            "--label team=hpc",
            "--log-driver json-file",
            "--log-opt max-size=10m",
            "--memory 4g",
            "--network jobs",
            "--network-alias sim",
            "-p 8080:80",
            "-p 9090:90",
            "--workdir /JobExec",
            "--mount type=bind,source=/in,target=/JobInput,readonly",
            "--mount type=volume,source=cache,target=/cache",
            "--tmpfs /run",
            "--volume /data:/data",
            "alpine:3 -n 4 --verbose",
        ]
        .join(" ");

        assert_eq!(DockerRunCmd::new(&spec).command_text(), expected);
    }

    #[test]
    fn blank_optionals_are_skipped() {
        let spec = DockerRunSpec {
            hostname: Some(" ".into()),
            memory: Some(String::new()),
            ..minimal()
        };
        let cmd = DockerRunCmd::new(&spec).command_text();
        assert!(!cmd.contains("--hostname"));
        assert!(!cmd.contains("--memory"));
    }

    #[test]
    fn env_file_lines() {
        let mut env = Env::new();
        env.push("A", "1");
        env.push("B", "");
        env.push_inherit("C");
        env.push("D", "x y$z");
        let spec = DockerRunSpec { env, ..minimal() };

        assert_eq!(
            DockerRunCmd::new(&spec).env_file_text(),
            "A=1\nB\nC\nD=x y$z\n"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut labels = Labels::new();
        labels.insert("z", "1").insert("a", "2");
        let mut env = Env::new();
        env.push("K", "v");
        let spec = DockerRunSpec {
            labels,
            env,
            mounts: vec![Mount::tmpfs("/scratch", Some(1 << 20))],
            ..minimal()
        };

        let first = DockerRunCmd::new(&spec).render();
        for _ in 0..5 {
            assert_eq!(DockerRunCmd::new(&spec.clone()).render(), first);
        }
    }
}
