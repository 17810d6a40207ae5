//! Request normalization
//!
//! Turns raw [`RequestArguments`] into a [`RequestConfiguration`] with every
//! default filled in, and builds the fresh [`SessionState`] for the session.
//!
//! The two command lists are treated differently:
//! - `autorun` is free text from the user. Each entry is MI-escaped and never
//!   template-substituted.
//! - `autorunBefore` is a list of structural command templates. Only the
//!   `$cwd` and `$target` slots are filled, and only `$cwd` is escaped.

use serde_json::Value;

use super::request::{RequestArguments, RequestConfiguration, TunnelArguments, TunnelConfig};
use super::settings::AdapterSettings;
use crate::error::ConfigError;
use crate::escape::{escape, substitute};
use crate::types::{PathRewrite, RequestMode, SessionState, StartupPhase};

/// Pre-run commands used when a request supplies no `autorunBefore`
pub const DEFAULT_PRE_RUN: [&str; 2] = [
    "gdb-set target-async on",
    "environment-directory \"$cwd\"",
];

/// Target selection appended to the default pre-run commands on attach
pub const ATTACH_TARGET_SELECT: &str = "target-select remote $target";

/// Output of [`normalize`]
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Canonical request configuration
    pub config: RequestConfiguration,
    /// Session state in the `Normalized` phase
    pub state: SessionState,
}

/// Parse a request's untyped `arguments` object
pub fn parse_arguments(arguments: &Value) -> Result<RequestArguments, ConfigError> {
    Ok(serde_json::from_value(arguments.clone())?)
}

/// Normalize launch/attach arguments
pub fn normalize(
    args: RequestArguments,
    mode: RequestMode,
    settings: &AdapterSettings,
) -> Result<Normalized, ConfigError> {
    let cwd = required(args.cwd, "cwd")?;
    let target = required(args.target, "target")?;

    let mut state = SessionState::new(mode);

    let tunnel = match args.tunnel {
        Some(raw) => {
            let tunnel = normalize_tunnel(raw, &cwd)?;
            state.set_path_rewrite(PathRewrite::new(&cwd, tunnel.remote_cwd.clone()));
            Some(tunnel)
        }
        None => None,
    };

    let autorun = args
        .autorun
        .unwrap_or_default()
        .iter()
        .map(|command| escape(command))
        .collect();

    let autorun_before = match args.autorun_before {
        Some(commands) => commands,
        None => {
            let mut commands: Vec<String> = DEFAULT_PRE_RUN.iter().map(|c| c.to_string()).collect();
            if mode.is_attach() {
                commands.push(ATTACH_TARGET_SELECT.to_string());
            }
            commands
        }
    };
    let autorun_before = autorun_before
        .iter()
        .map(|command| substitute(command, &cwd, &target))
        .collect();

    state
        .advance(StartupPhase::Normalized)
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    let config = RequestConfiguration {
        cwd,
        target,
        driver_path: args
            .driver_path
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| settings.driver_path.clone()),
        driver_args: args.driver_args.unwrap_or_default(),
        executable: args.executable.unwrap_or_default(),
        program_args: args.program_args.unwrap_or_default(),
        autorun,
        autorun_before,
        tunnel,
        print_calls: args.print_calls.unwrap_or(settings.print_calls),
        show_dev_debug_output: args
            .show_dev_debug_output
            .unwrap_or(settings.show_dev_debug_output),
    };

    tracing::debug!(
        mode = %mode,
        target = %config.target,
        tunnel = config.tunnel.is_some(),
        "Normalized request configuration"
    );

    Ok(Normalized { config, state })
}

/// Fill the tunnel defaults. Without a remote `cwd` the remote side mirrors
/// the local working directory, so the path rewrite is an identity.
fn normalize_tunnel(raw: TunnelArguments, local_cwd: &str) -> Result<TunnelConfig, ConfigError> {
    let host = required(raw.host, "ssh.host")?;
    let remote_cwd = raw
        .cwd
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| local_cwd.replace('\\', "/"));
    let port = raw.port.unwrap_or(TunnelConfig::DEFAULT_PORT);
    if port == 0 {
        return Err(ConfigError::Invalid("ssh.port must not be 0".to_string()));
    }

    Ok(TunnelConfig {
        host,
        port,
        forward_x11: raw.forward_x11.unwrap_or(true),
        x11_host: raw
            .x11_host
            .unwrap_or_else(|| TunnelConfig::DEFAULT_X11_HOST.to_string()),
        x11_port: raw.x11_port.unwrap_or(TunnelConfig::DEFAULT_X11_PORT),
        remote_x11_screen: raw
            .remote_x11_screen
            .unwrap_or(TunnelConfig::DEFAULT_REMOTE_X11_SCREEN),
        remote_cwd,
        user: raw.user,
        password: raw.password,
        keyfile: raw.keyfile,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn launch_args(cwd: &str, target: &str) -> RequestArguments {
        RequestArguments {
            cwd: Some(cwd.to_string()),
            target: Some(target.to_string()),
            ..Default::default()
        }
    }

    fn run(args: RequestArguments, mode: RequestMode) -> Normalized {
        normalize(args, mode, &AdapterSettings::default()).unwrap()
    }

    #[test]
    fn test_missing_autorun_defaults_to_empty() {
        for mode in [RequestMode::Launch, RequestMode::Attach] {
            let out = run(launch_args("/proj", "./a.out"), mode);
            assert!(out.config.autorun.is_empty());
        }
    }

    #[test]
    fn test_launch_default_pre_run() {
        let out = run(launch_args("/proj", "./a.out"), RequestMode::Launch);
        assert_eq!(
            out.config.autorun_before,
            vec![
                "gdb-set target-async on".to_string(),
                "environment-directory \"/proj\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_launch_default_pre_run_escapes_cwd() {
        let out = run(launch_args(r#"C:\my "proj""#, "a.exe"), RequestMode::Launch);
        assert_eq!(
            out.config.autorun_before[1],
            r#"environment-directory "C:\\my \"proj\"""#
        );
    }

    #[test]
    fn test_attach_default_pre_run_selects_raw_target() {
        let out = run(launch_args("/proj", "10.0.0.5:\"1234\""), RequestMode::Attach);
        assert_eq!(out.config.autorun_before.len(), 3);
        assert_eq!(out.config.autorun_before[0], "gdb-set target-async on");
        assert_eq!(out.config.autorun_before[1], "environment-directory \"/proj\"");
        assert_eq!(
            out.config.autorun_before[2],
            "target-select remote 10.0.0.5:\"1234\""
        );
    }

    #[test]
    fn test_explicit_pre_run_not_extended_on_attach() {
        let mut args = launch_args("/proj", "host:1234");
        args.autorun_before = Some(vec!["file-exec-and-symbols $target".to_string()]);
        let out = run(args, RequestMode::Attach);
        assert_eq!(
            out.config.autorun_before,
            vec!["file-exec-and-symbols host:1234".to_string()]
        );
    }

    #[test]
    fn test_autorun_escaped_not_substituted() {
        let mut args = launch_args("/proj", "./a.out");
        args.autorun = Some(vec![
            r#"settings set prompt "x""#.to_string(),
            "echo $cwd".to_string(),
        ]);
        let out = run(args, RequestMode::Launch);
        assert_eq!(
            out.config.autorun,
            vec![
                r#"settings set prompt \"x\""#.to_string(),
                "echo $cwd".to_string()
            ]
        );
    }

    #[test]
    fn test_pre_run_not_escaped_as_a_whole() {
        let mut args = launch_args("/proj", "./a.out");
        args.autorun_before = Some(vec![r#"gdb-set args "$target""#.to_string()]);
        let out = run(args, RequestMode::Launch);
        assert_eq!(out.config.autorun_before, vec![r#"gdb-set args "./a.out""#.to_string()]);
    }

    #[test]
    fn test_session_flags_for_launch() {
        let out = run(launch_args("/proj", "./a.out"), RequestMode::Launch);
        let state = out.state;
        assert_eq!(state.phase(), StartupPhase::Normalized);
        assert!(!state.quit);
        assert!(!state.attached());
        assert!(!state.need_continue);
        assert!(!state.uses_tunnel());
        assert!(!state.started());
        assert!(!state.crashed());
        assert!(!state.debug_ready);
    }

    #[test]
    fn test_tunnel_defaults_with_remote_cwd() {
        let mut args = launch_args(r"C:\work\proj", "./a.out");
        args.tunnel = Some(TunnelArguments {
            host: Some("10.0.0.5".to_string()),
            cwd: Some("/home/dev/proj".to_string()),
            ..Default::default()
        });
        let out = run(args, RequestMode::Attach);

        let tunnel = out.config.tunnel.as_ref().unwrap();
        assert_eq!(tunnel.host, "10.0.0.5");
        assert_eq!(tunnel.port, 22);
        assert!(tunnel.forward_x11);
        assert_eq!(tunnel.x11_host, "localhost");
        assert_eq!(tunnel.x11_port, 6000);
        assert_eq!(tunnel.remote_x11_screen, 0);

        assert!(out.state.uses_tunnel());
        let rewrite = out.state.path_rewrite().unwrap();
        assert_eq!(rewrite.local_root, "C:/work/proj");
        assert_eq!(rewrite.remote_root, "/home/dev/proj");
    }

    #[test]
    fn test_tunnel_with_only_host_mirrors_local_cwd() {
        for mode in [RequestMode::Launch, RequestMode::Attach] {
            let mut args = launch_args(r"C:\work\proj", "10.0.0.5:1234");
            args.tunnel = Some(TunnelArguments {
                host: Some("10.0.0.5".to_string()),
                ..Default::default()
            });
            let out = run(args, mode);

            let tunnel = out.config.tunnel.as_ref().unwrap();
            assert_eq!(tunnel.port, 22);
            assert!(tunnel.forward_x11);
            assert_eq!(tunnel.x11_host, "localhost");
            assert_eq!(tunnel.x11_port, 6000);
            assert_eq!(tunnel.remote_x11_screen, 0);
            assert_eq!(tunnel.remote_cwd, "C:/work/proj");

            let rewrite = out.state.path_rewrite().unwrap();
            assert_eq!(rewrite.to_remote(r"C:\work\proj\main.c"), "C:/work/proj/main.c");
        }
    }

    #[test]
    fn test_attach_with_host_only_tunnel() {
        let mut args = launch_args("/proj", "10.0.0.5:1234");
        args.tunnel = Some(TunnelArguments {
            host: Some("10.0.0.5".to_string()),
            ..Default::default()
        });
        let out = run(args, RequestMode::Attach);

        assert!(out.state.attached());
        assert!(out.state.need_continue);
        assert!(out.state.uses_tunnel());
        assert_eq!(
            out.config.autorun_before.last().map(String::as_str),
            Some("target-select remote 10.0.0.5:1234")
        );
    }

    #[test]
    fn test_tunnel_explicit_values_kept() {
        let mut args = launch_args("/proj", "./a.out");
        args.tunnel = Some(TunnelArguments {
            host: Some("box".to_string()),
            port: Some(2222),
            forward_x11: Some(false),
            x11_host: Some("127.0.0.1".to_string()),
            x11_port: Some(6001),
            remote_x11_screen: Some(1),
            cwd: Some("/r".to_string()),
            ..Default::default()
        });
        let tunnel = run(args, RequestMode::Launch).config.tunnel.unwrap();
        assert_eq!(tunnel.port, 2222);
        assert!(!tunnel.forward_x11);
        assert_eq!(tunnel.x11_host, "127.0.0.1");
        assert_eq!(tunnel.x11_port, 6001);
        assert_eq!(tunnel.remote_x11_screen, 1);
    }

    #[test]
    fn test_tunnel_without_host_is_rejected() {
        let mut args = launch_args("/proj", "./a.out");
        args.tunnel = Some(TunnelArguments::default());
        let err = normalize(args, RequestMode::Launch, &AdapterSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "ssh.host"));
    }

    #[test]
    fn test_tunnel_port_zero_is_rejected() {
        let mut args = launch_args("/proj", "./a.out");
        args.tunnel = Some(TunnelArguments {
            host: Some("box".to_string()),
            port: Some(0),
            cwd: Some("/r".to_string()),
            ..Default::default()
        });
        let err = normalize(args, RequestMode::Launch, &AdapterSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_cwd_or_target() {
        let settings = AdapterSettings::default();
        let err = normalize(
            RequestArguments {
                target: Some("a".into()),
                ..Default::default()
            },
            RequestMode::Launch,
            &settings,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "cwd"));

        let err = normalize(launch_args("/proj", ""), RequestMode::Launch, &settings).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "target"));
    }

    #[test]
    fn test_driver_defaults_from_settings() {
        let settings = AdapterSettings {
            driver_path: "/opt/lldb-mi".to_string(),
            print_calls: true,
            ..Default::default()
        };
        let out = normalize(launch_args("/p", "t"), RequestMode::Launch, &settings).unwrap();
        assert_eq!(out.config.driver_path, "/opt/lldb-mi");
        assert!(out.config.print_calls);
        assert!(!out.config.show_dev_debug_output);
        assert!(out.config.driver_args.is_empty());
        assert_eq!(out.config.executable, "");
        assert_eq!(out.config.program_args, "");
    }

    #[test]
    fn test_normalizing_normalized_configuration_is_identity() {
        let mut args = launch_args("/proj", "./a.out");
        args.autorun = Some(vec!["break main".to_string()]);
        args.tunnel = Some(TunnelArguments {
            host: Some("box".to_string()),
            cwd: Some("/srv/proj".to_string()),
            user: Some("dev".to_string()),
            ..Default::default()
        });
        let settings = AdapterSettings::default();

        for mode in [RequestMode::Launch, RequestMode::Attach] {
            let first = normalize(args.clone(), mode, &settings).unwrap().config;
            let second = normalize(first.clone().into(), mode, &settings).unwrap().config;
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_parse_arguments() {
        let args = parse_arguments(&json!({"cwd": "/p", "target": "t"})).unwrap();
        assert_eq!(args.cwd.as_deref(), Some("/p"));

        let err = parse_arguments(&json!({"cwd": 3})).unwrap_err();
        assert!(matches!(err, ConfigError::Arguments(_)));
    }
}
