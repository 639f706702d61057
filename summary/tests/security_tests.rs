//! Security posture of the seed host

mod common;

use common::fixtures::*;
use mongodb_summary::errors::SecurityError;
use mongodb_summary::proto::{CommandLineOptions, TlsOptions};
use mongodb_summary::security::inspect_security;
use rstest::rstest;

#[rstest]
#[case::nothing_configured(cmd_line("", "", None), "disabled", "disabled")]
#[case::key_file(cmd_line("", "a file", None), "enabled", "disabled")]
#[case::authorization(cmd_line("something here", "", None), "enabled", "disabled")]
#[case::tls_mode(cmd_line("", "", Some("super secure")), "disabled", "super secure")]
#[case::tls_explicitly_disabled(cmd_line("", "", Some("disabled")), "disabled", "disabled")]
#[case::empty_tls_mode(cmd_line("", "", Some("")), "disabled", "disabled")]
#[tokio::test]
async fn test_security_posture(
    #[case] opts: CommandLineOptions,
    #[case] auth: &str,
    #[case] tls: &str,
) {
    let cluster = FakeCluster::new().with_node(
        hosts::A1,
        FakeNode::new()
            .with_cmd_line(Some(opts))
            .with_accounts(Some(1), Some(2)),
    );

    let posture = inspect_security(&cluster.connection(hosts::A1)).await.unwrap();

    assert_eq!(posture.users, 1);
    assert_eq!(posture.roles, 2);
    assert_eq!(posture.auth, auth);
    assert_eq!(posture.tls, tls);
}

#[tokio::test]
async fn test_legacy_ssl_mode_is_read() {
    let mut opts = cmd_line("", "", None);
    opts.parsed.net.ssl = Some(TlsOptions {
        mode: "requireSSL".to_string(),
    });
    let cluster = FakeCluster::new().with_node(hosts::A1, FakeNode::new().with_cmd_line(Some(opts)));

    let posture = inspect_security(&cluster.connection(hosts::A1)).await.unwrap();

    assert_eq!(posture.tls, "requireSSL");
}

#[tokio::test]
async fn test_missing_command_line_options_fails() {
    let cluster = FakeCluster::new().with_node(hosts::A1, FakeNode::new().with_cmd_line(None));

    let result = inspect_security(&cluster.connection(hosts::A1)).await;

    assert!(
        matches!(result, Err(SecurityError::CommandLineOptions(_))),
        "got {:?}",
        result
    );
}

#[tokio::test]
async fn test_users_count_failure_fails() {
    let cluster = FakeCluster::new().with_node(hosts::A1, FakeNode::new().with_accounts(None, Some(2)));

    let result = inspect_security(&cluster.connection(hosts::A1)).await;

    assert!(matches!(result, Err(SecurityError::UsersCount(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_roles_count_failure_fails() {
    let cluster = FakeCluster::new().with_node(hosts::A1, FakeNode::new().with_accounts(Some(1), None));

    let result = inspect_security(&cluster.connection(hosts::A1)).await;

    assert!(matches!(result, Err(SecurityError::RolesCount(_))), "got {:?}", result);
}
