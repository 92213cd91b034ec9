//! Property-based tests for the cascade engine
//!
//! These tests verify invariants that must hold for any toggle sequence:
//! - Checking cascades down the chain, unchecking cascades up
//! - A toggle reaches every descendant with the same rule
//! - Toggles are idempotent and keep grants consistent
//! - Visibility requires View at every ancestor
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

use permatrix::{
    apply_toggle, is_all_full_checked, is_visible, select_all_full, Field, Grant, Module,
    ModuleTree, PermissionMap,
};

/// Mixed download support at every level
static TREE: &[Module] = &[
    Module::new("r1", "R1", true, &[
        Module::new("r1a", "R1a", false, &[
            Module::new("r1a1", "R1a1", true, &[]),
            Module::new("r1a2", "R1a2", false, &[]),
        ]),
        Module::new("r1b", "R1b", true, &[]),
    ]),
    Module::new("r2", "R2", false, &[
        Module::new("r2a", "R2a", true, &[
            Module::new("r2a1", "R2a1", false, &[]),
        ]),
    ]),
];

const IDS: &[&str] = &["r1", "r1a", "r1a1", "r1a2", "r1b", "r2", "r2a", "r2a1"];

fn tree() -> ModuleTree {
    ModuleTree::new(TREE).unwrap()
}

fn field() -> impl Strategy<Value = Field> {
    prop::sample::select(Field::ALL.to_vec())
}

fn module_id() -> impl Strategy<Value = &'static str> {
    prop::sample::select(IDS.to_vec())
}

/// Arbitrary maps, not necessarily consistent
fn any_map() -> impl Strategy<Value = PermissionMap> {
    prop::collection::vec(0u8..32, IDS.len()).prop_map(|masks| {
        IDS.iter()
            .zip(masks)
            .map(|(id, m)| (*id, Grant::from_bits(m)))
            .collect()
    })
}

/// Maps reachable through the UI: a sequence of toggles from empty
fn reachable_map() -> impl Strategy<Value = PermissionMap> {
    prop::collection::vec((module_id(), field(), any::<bool>()), 0..12).prop_map(|toggles| {
        let t = tree();
        toggles.into_iter().fold(PermissionMap::new(), |map, (id, f, v)| {
            apply_toggle(&t, &map, id, f, v).unwrap()
        })
    })
}

proptest! {
    /// Checking a chain field grants every lower field on the module
    #[test]
    fn check_cascades_down(map in any_map(), id in module_id(), f in field()) {
        let t = tree();
        let next = apply_toggle(&t, &map, id, f, true).unwrap();
        let g = next.get(id);
        if f.in_chain() {
            for lower in Field::ALL.into_iter().filter(|l| l.in_chain() && l.bit() <= f.bit()) {
                prop_assert!(g.get(lower), "{} should imply {}", f, lower);
            }
        }
    }

    /// Unchecking a chain field clears every higher field on the module
    #[test]
    fn uncheck_cascades_up(map in any_map(), id in module_id(), f in field()) {
        let t = tree();
        let next = apply_toggle(&t, &map, id, f, false).unwrap();
        let g = next.get(id);
        if f.in_chain() {
            for higher in Field::ALL.into_iter().filter(|h| h.in_chain() && h.bit() >= f.bit()) {
                prop_assert!(!g.get(higher), "clearing {} should clear {}", f, higher);
            }
            prop_assert_eq!(g.download(), map.get(id).download());
        }
    }

    /// Every descendant receives the single-module rule; everything else is untouched
    #[test]
    fn subtree_propagation(map in any_map(), id in module_id(), f in field(), v in any::<bool>()) {
        let t = tree();
        let next = apply_toggle(&t, &map, id, f, v).unwrap();
        let origin = t.find_module(id).unwrap();
        let targets: Vec<&str> = t.subtree(origin).iter().map(|m| m.id).collect();

        for m in t.flatten() {
            let before = map.get(m.id);
            let expected = if !targets.contains(&m.id) || (f == Field::Download && !m.supports_download) {
                before
            } else {
                before.toggled(f, v)
            };
            prop_assert_eq!(next.get(m.id), expected, "module {}", m.id);
        }
    }

    #[test]
    fn toggles_are_idempotent(map in any_map(), id in module_id(), f in field(), v in any::<bool>()) {
        let t = tree();
        let once = apply_toggle(&t, &map, id, f, v).unwrap();
        let twice = apply_toggle(&t, &once, id, f, v).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Maps built only through toggles never break the chain invariants
    /// and never carry Download on a module without support
    #[test]
    fn reachable_maps_are_consistent(map in reachable_map()) {
        let t = tree();
        for m in t.flatten() {
            let g = map.get(m.id);
            prop_assert!(g.is_consistent(), "module {} has {:#07b}", m.id, g.bits());
            if !m.supports_download {
                prop_assert!(!g.download());
            }
        }
    }

    /// Any ancestor without View hides the module, whatever its own grant
    #[test]
    fn visibility_is_transitive(map in any_map(), id in module_id()) {
        let t = tree();
        let hidden_by = t.ancestors(id).into_iter().find(|a| !map.get(a).view());
        prop_assert_eq!(is_visible(&t, &map, id), hidden_by.is_none());
    }

    /// Any single toggle after select-all either keeps or breaks the
    /// header checkbox in line with the affected rows
    #[test]
    fn select_all_round_trip(id in module_id(), f in field()) {
        let t = tree();
        let full = select_all_full(&t, true);
        prop_assert!(is_all_full_checked(&t, &full));

        let cleared = select_all_full(&t, false);
        prop_assert!(!is_all_full_checked(&t, &cleared));
        prop_assert!(cleared.iter().all(|(_, g)| g.is_empty()));

        let next = apply_toggle(&t, &full, id, f, false).unwrap();
        let module = t.find_module(id).unwrap();
        let affected = f != Field::Download || t.supports_download_transitively(module);
        prop_assert_eq!(is_all_full_checked(&t, &next), !affected);
    }
}
