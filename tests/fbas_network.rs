use assert_cmd::Command;
use predicates::prelude::*;

const NODES: &str = "test_data/nodes.json";
const ORGANIZATIONS: &str = "test_data/organizations.json";

#[test]
fn failing_nodes_are_printed_by_id() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("--failing-nodes")
        .assert()
        .success()
        .stdout(predicate::str::contains("failing_nodes: [3,5,6]"));
    Ok(())
}

#[test]
fn failing_nodes_are_printed_by_public_key() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("-f")
        .arg("-p")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"failing_nodes: ["lobstr1","watcher","dependent"]"#,
        ));
    Ok(())
}

#[test]
fn transitive_quorum_set_is_the_sdf_cluster() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("--transitive-quorum-set")
        .arg("-p")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"transitive_quorum_set: ["sdf1","sdf2","sdf3"]"#,
        ));
    Ok(())
}

#[test]
fn strongly_connected_components_are_found() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("--strongly-connected-components")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("strongly_connected_components: [")
                .and(predicate::str::contains("[0,1,2]"))
                .and(predicate::str::contains("[3,4]")),
        );
    Ok(())
}

#[test]
fn failing_organizations_need_organizations_file() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("--failing-organizations")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Can't find failing organizations without organizations data",
        ));
    Ok(())
}

#[test]
fn failing_organizations_are_printed_by_name() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("-o")
        .arg(ORGANIZATIONS)
        .arg("--failing-organizations")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"failing_organizations: ["LOBSTR"]"#));
    Ok(())
}

#[test]
fn slices_of_a_node() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("--slices")
        .arg("sdf1")
        .arg("--no-slice-cache")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"slices: [["sdf1","sdf2"],["sdf1","sdf3"],["sdf2","sdf3"]]"#,
        ));
    Ok(())
}

#[test]
fn silent_all_prints_only_results() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("-o")
        .arg(ORGANIZATIONS)
        .arg("--all")
        .arg("--silent")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("failing_nodes:")
                .and(predicate::str::contains("transitive_quorum_set:"))
                .and(predicate::str::contains("strongly_connected_components:"))
                .and(predicate::str::contains("failing_organizations:"))
                .and(predicate::str::contains("There are").not()),
        );
    Ok(())
}

#[test]
fn nodes_can_be_read_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let input = r#"[
            {
                "publicKey": "A", "active": true, "isValidating": true,
                "quorumSet": { "threshold": 1, "validators": ["B"] }
            },
            {
                "publicKey": "B", "active": true, "isValidating": true,
                "quorumSet": { "threshold": 1, "validators": ["A"] }
            },
            {
                "publicKey": "C", "active": true, "isValidating": true,
                "quorumSet": { "threshold": 5, "validators": ["A"] }
            }
        ]"#;
    Command::cargo_bin("fbas_network")?
        .write_stdin(input.as_bytes())
        .arg("-f")
        .arg("-t")
        .arg("-p")
        .assert()
        .success()
        .stderr(predicate::str::contains("Reading nodes JSON from STDIN..."))
        .stdout(
            predicate::str::contains(r#"failing_nodes: ["C"]"#)
                .and(predicate::str::contains(r#"transitive_quorum_set: ["A","B"]"#)),
        );
    Ok(())
}

#[test]
fn duplicate_public_keys_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let input = r#"[
            { "publicKey": "A", "quorumSet": { "threshold": 1, "validators": ["A"] } },
            { "publicKey": "A", "quorumSet": { "threshold": 1, "validators": ["A"] } }
        ]"#;
    Command::cargo_bin("fbas_network")?
        .write_stdin(input.as_bytes())
        .arg("-a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate public key A"));
    Ok(())
}

#[test]
fn missing_nodes_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg("test_data/does_not_exist.json")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn failing_nodes_commentary_counts_active_nodes() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("fbas_network")?
        .arg(NODES)
        .arg("-f")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 active nodes are failing (not validating"));
    Ok(())
}
