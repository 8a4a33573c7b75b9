//! Property tests for config flattening.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use floop::config::flatten;
use floop::FloopError;

/// group name -> core names, each core getting a distinct address
fn fleet_shape() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        "g[a-z0-9]{1,6}",
        prop::collection::btree_set("c[a-z0-9]{1,6}", 1..5).prop_map(|s| s.into_iter().collect()),
        1..4,
    )
}

/// Core names are prefixed with their group so they stay unique fleet-wide.
fn document(shape: &BTreeMap<String, Vec<String>>) -> Value {
    let mut groups = Map::new();
    groups.insert(
        "default".to_string(),
        json!({
            "host_docker_machine_bin": "/usr/local/bin/docker-machine",
            "host_rsync_bin": "/usr/bin/rsync",
            "host_key": "~/.ssh/id_rsa",
            "user": "floop",
        }),
    );
    let mut n = 0;
    for (group, cores) in shape {
        let mut entries = Map::new();
        entries.insert(
            "default".to_string(),
            json!({"host_source": "./src", "target_source": "/home/floop/floop"}),
        );
        for core in cores {
            n += 1;
            entries.insert(format!("{}_{}", group, core), json!({"address": format!("10.0.{}.{}", n / 250, n % 250)}));
        }
        groups.insert(group.clone(), json!({ "cores": entries }));
    }
    json!({ "groups": groups })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: flattening yields exactly one entry per non-default core.
    #[test]
    fn property_one_entry_per_core(shape in fleet_shape()) {
        let flat = flatten(&document(&shape)).unwrap();
        let expected: usize = shape.values().map(Vec::len).sum();
        prop_assert_eq!(flat.len(), expected);
        prop_assert!(flat.iter().all(|f| f.core != "default"));
    }

    /// PROPERTY: every flattened entry carries its group and inherited keys.
    #[test]
    fn property_every_key_inherited(shape in fleet_shape()) {
        for entry in flatten(&document(&shape)).unwrap() {
            prop_assert!(shape.contains_key(&entry.group));
            prop_assert_eq!(entry.user.as_str(), "floop");
            prop_assert_eq!(entry.host_source.as_str(), "./src");
            prop_assert_eq!(entry.host_rsync_bin.as_str(), "/usr/bin/rsync");
            prop_assert!(!entry.address.is_empty());
        }
    }

    /// PROPERTY: reusing an address anywhere in the fleet is rejected.
    #[test]
    fn property_duplicate_address_rejected(shape in fleet_shape(), pick in any::<prop::sample::Index>()) {
        let mut raw = document(&shape);
        let cores: Vec<(String, String)> = shape
            .iter()
            .flat_map(|(g, cs)| cs.iter().map(move |c| (g.clone(), format!("{}_{}", g, c))))
            .collect();
        prop_assume!(cores.len() > 1);

        let (g, c) = &cores[pick.index(cores.len())];
        let address = raw["groups"][g.as_str()]["cores"][c.as_str()]["address"].clone();
        let (og, oc) = cores.iter().find(|(og, oc)| !(og == g && oc == c)).unwrap();
        raw["groups"][og.as_str()]["cores"][oc.as_str()]["address"] = address;

        let err = flatten(&raw).unwrap_err();
        prop_assert!(
            matches!(err, FloopError::RedundantTargetConfig { key: "address", .. }),
            "{:?}", err
        );
    }
}
