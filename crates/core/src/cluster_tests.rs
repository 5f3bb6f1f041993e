use super::*;
use yare::parameterized;

#[parameterized(
    cx3 = {"pbs_version = 19.1.3", Cluster::Cx3},
    cx3_phase_2 = {"pbs_version = 2024.1.1", Cluster::Cx3Phase2},
    unrecognised_version = {"pbs_version = 18.0.0", Cluster::Unknown},
    missing_key = {"some_other_key = foo", Cluster::Unknown},
    empty = {"", Cluster::Unknown},
)]
fn from_version_output_cases(stdout: &str, expected: Cluster) {
    assert_eq!(Cluster::from_version_output(stdout), expected);
}

#[test]
fn from_version_output_ignores_unparseable_lines() {
    let stdout = "garbage\npbs_version = 19.0\nmore garbage";
    assert_eq!(Cluster::from_version_output(stdout), Cluster::Cx3);
}

#[test]
fn from_server_known_hosts() {
    assert_eq!(Cluster::from_server("pbs1.rcs.ic.ac.uk"), Cluster::Cx3);
    assert_eq!(Cluster::from_server("pbs-7"), Cluster::Cx3Phase2);
    assert_eq!(Cluster::from_server("some-other-host"), Cluster::Unknown);
}

#[test]
fn display_roundtrips_with_from_str() {
    for cluster in [Cluster::Cx3, Cluster::Cx3Phase2, Cluster::Unknown] {
        let s = cluster.to_string();
        assert_eq!(Cluster::from_str_or_unknown(&s), cluster);
    }
}
