//! Unit tests for av-walker.

use std::cell::RefCell;
use std::rc::Rc;

use av_core::{AvatarId, HandlerRef, Pose, WalkResult, WalkerSpec};
use av_registry::HandlerError;
use glam::Vec3;

use crate::{WalkManager, WalkerRegistry, walker_fn};

// ── Helpers ───────────────────────────────────────────────────────────────────

const AVATAR: AvatarId = AvatarId(0);

fn spec(s: &str) -> WalkerSpec {
    s.parse().unwrap()
}

fn chain(specs: &[&str]) -> WalkManager {
    let mut m = WalkManager::new();
    for s in specs {
        m.append(*s).unwrap();
    }
    m
}

fn names(m: &WalkManager) -> Vec<String> {
    m.specs().iter().map(HandlerRef::to_string).collect()
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

// ── Registration ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod registration_tests {
    use super::*;
    use crate::WalkError;

    #[test]
    fn append_preserves_order() {
        let m = chain(&["w.a.go", "w.b.go", "w.c.go"]);
        assert_eq!(names(&m), vec!["w.a.go", "w.b.go", "w.c.go"]);
    }

    #[test]
    fn append_malformed_rejected() {
        let mut m = WalkManager::new();
        assert!(matches!(m.append(["w", "a"]), Err(WalkError::Identity(_))));
        assert!(matches!(m.append("w.a.go.extra"), Err(WalkError::Identity(_))));
        assert!(m.is_empty());
    }

    #[test]
    fn append_duplicate_rejected() {
        let mut m = chain(&["w.a.go"]);
        assert!(matches!(m.append("w.a.go"), Err(WalkError::Duplicate(_))));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn append_then_remove_restores_list() {
        let mut m = chain(&["w.a.go", "w.b.go"]);
        let before = m.clone();
        m.append("w.c.go").unwrap();
        assert!(m.remove(&spec("w.c.go")));
        assert_eq!(m, before);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut m = chain(&["w.a.go"]);
        assert!(!m.remove(&spec("w.z.go")));
        assert_eq!(names(&m), vec!["w.a.go"]);
    }

    #[test]
    fn insert_before_present_anchor() {
        let mut m = chain(&["w.a.go", "w.c.go"]);
        m.insert_before("w.b.go", Some(&spec("w.c.go"))).unwrap();
        assert_eq!(names(&m), vec!["w.a.go", "w.b.go", "w.c.go"]);
        m.insert_before("w.first.go", Some(&spec("w.a.go"))).unwrap();
        assert_eq!(m.specs()[0], spec("w.first.go"));
    }

    #[test]
    fn insert_before_absent_anchor_is_noop() {
        let mut m = chain(&["w.a.go", "w.b.go"]);
        let before = m.clone();
        m.insert_before("w.new.go", Some(&spec("w.missing.go"))).unwrap();
        assert_eq!(m, before);
        assert!(!m.contains(&spec("w.new.go")));
    }

    #[test]
    fn insert_before_without_anchor_appends() {
        let mut m = chain(&["w.a.go"]);
        m.insert_before("w.b.go", None).unwrap();
        assert_eq!(names(&m), vec!["w.a.go", "w.b.go"]);
    }

    #[test]
    fn insert_before_rejects_duplicate_and_malformed() {
        let mut m = chain(&["w.a.go", "w.b.go"]);
        assert!(matches!(
            m.insert_before("w.b.go", Some(&spec("w.a.go"))),
            Err(WalkError::Duplicate(_))
        ));
        assert!(matches!(
            m.insert_before("bad", Some(&spec("w.missing.go"))),
            Err(WalkError::Identity(_))
        ));
        assert_eq!(names(&m), vec!["w.a.go", "w.b.go"]);
    }

    #[test]
    fn remove_module_drops_only_that_module() {
        let mut m = chain(&["a.x.go", "b.x.go", "a.y.go"]);
        assert_eq!(m.remove_module("a"), 2);
        assert_eq!(names(&m), vec!["b.x.go"]);
        assert_eq!(m.remove_module("a"), 0);
    }

    #[test]
    fn remove_all_clears() {
        let mut m = chain(&["w.a.go", "w.b.go"]);
        m.remove_all();
        assert!(m.is_empty());
    }

    #[test]
    fn default_chain_order() {
        let m = WalkManager::with_default_chain().unwrap();
        assert_eq!(
            names(&m),
            vec!["stock.portal.check", "stock.fall.recover", "stock.collision.resolve"]
        );
    }
}

// ── Walk ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walk_tests {
    use super::*;

    type Calls = Rc<RefCell<Vec<&'static str>>>;

    /// A stage that records itself, moves +X by `dx`, and optionally finalizes.
    fn stage(reg: &mut WalkerRegistry, calls: &Calls, name: &'static str, dx: f32, is_final: bool) {
        let calls = Rc::clone(calls);
        reg.register(
            spec(&format!("t.{name}.walk")),
            walker_fn(move |_a, pose, _t, _d| {
                calls.borrow_mut().push(name);
                let pose = pose.translated(Vec3::new(dx, 0.0, 0.0));
                Ok(WalkResult { pose, is_final })
            }),
        );
    }

    #[test]
    fn stages_thread_pose_in_order() {
        let mut reg = WalkerRegistry::new();
        let calls: Calls = Rc::default();
        stage(&mut reg, &calls, "one", 1.0, false);
        stage(&mut reg, &calls, "two", 2.0, false);
        let m = chain(&["t.one.walk", "t.two.walk"]);

        let out = m.walk(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.016);
        assert!(close(out.position, Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(*calls.borrow(), vec!["one", "two"]);
    }

    #[test]
    fn final_stage_stops_chain() {
        let mut reg = WalkerRegistry::new();
        let calls: Calls = Rc::default();
        stage(&mut reg, &calls, "one", 1.0, false);
        stage(&mut reg, &calls, "two", 2.0, true);
        stage(&mut reg, &calls, "three", 100.0, false);
        let m = chain(&["t.one.walk", "t.two.walk", "t.three.walk"]);

        let trace = m.walk_traced(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.016);
        assert_eq!(*calls.borrow(), vec!["one", "two"]);
        assert_eq!(trace.pose, Pose::at(Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(trace.finalized_by, Some(spec("t.two.walk")));
        assert_eq!(trace.ran.len(), 2);
    }

    #[test]
    fn all_unresolved_is_identity() {
        let reg = WalkerRegistry::new();
        let m = chain(&["t.a.walk", "t.b.walk", "t.c.walk"]);
        let input = Pose::at(Vec3::new(1.0, 2.0, 3.0));
        let trace = m.walk_traced(&reg, AVATAR, input, 5.0, 0.016);
        assert_eq!(trace.pose, input);
        assert_eq!(trace.unresolved.len(), 3);
        assert!(trace.finalized_by.is_none());
    }

    #[test]
    fn empty_chain_is_identity() {
        let reg = WalkerRegistry::new();
        let input = Pose::at(Vec3::ONE);
        assert_eq!(WalkManager::new().walk(&reg, AVATAR, input, 0.0, 0.0), input);
    }

    #[test]
    fn unresolved_stage_passes_through_to_next() {
        let mut reg = WalkerRegistry::new();
        let calls: Calls = Rc::default();
        stage(&mut reg, &calls, "after", 1.0, false);
        let m = chain(&["t.reloaded.walk", "t.after.walk"]);
        let out = m.walk(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.016);
        assert!(close(out.position, Vec3::X));
    }

    #[test]
    fn failing_stage_keeps_precall_pose() {
        let mut reg = WalkerRegistry::new();
        let calls: Calls = Rc::default();
        stage(&mut reg, &calls, "one", 1.0, false);
        reg.register(
            spec("t.broken.walk"),
            walker_fn(|_a, _p, _t, _d| Err(HandlerError::Failed("nan in pose".into()))),
        );
        stage(&mut reg, &calls, "three", 1.0, false);
        let m = chain(&["t.one.walk", "t.broken.walk", "t.three.walk"]);

        let trace = m.walk_traced(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.016);
        assert!(close(trace.pose.position, Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(trace.failed, vec![spec("t.broken.walk")]);
        assert_eq!(*calls.borrow(), vec!["one", "three"]);
    }

    #[test]
    fn panicking_stage_is_contained() {
        let mut reg = WalkerRegistry::new();
        let calls: Calls = Rc::default();
        stage(&mut reg, &calls, "ok", 1.0, false);
        reg.register(
            spec("t.bad.walk"),
            walker_fn(|_a, pose, _t, _d| {
                let empty: Vec<f32> = Vec::new();
                Ok(WalkResult::finish(pose.translated(Vec3::splat(empty[0]))))
            }),
        );
        let m = chain(&["t.ok.walk", "t.bad.walk"]);

        let trace = m.walk_traced(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.016);
        assert!(close(trace.pose.position, Vec3::X));
        assert_eq!(trace.failed, vec![spec("t.bad.walk")]);
        assert_eq!(trace.finalized_by, None);
    }

    #[test]
    fn time_and_delta_threaded_unchanged() {
        let mut reg = WalkerRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b"] {
            let seen = Rc::clone(&seen);
            reg.register(
                spec(&format!("t.{name}.walk")),
                walker_fn(move |avatar, pose, t, d| {
                    seen.borrow_mut().push((avatar, t, d));
                    Ok(WalkResult::pass(pose))
                }),
            );
        }
        let m = chain(&["t.a.walk", "t.b.walk"]);
        m.walk(&reg, AvatarId(4), Pose::IDENTITY, 1.5, 0.25);
        assert_eq!(*seen.borrow(), vec![(AvatarId(4), 1.5, 0.25), (AvatarId(4), 1.5, 0.25)]);
    }

    #[test]
    fn hot_reload_between_walks() {
        let mut reg = WalkerRegistry::new();
        let calls: Calls = Rc::default();
        stage(&mut reg, &calls, "move", 1.0, false);
        let m = chain(&["t.move.walk"]);
        assert!(close(m.walk(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.0).position, Vec3::X));

        stage(&mut reg, &calls, "move", 5.0, false);
        assert!(close(m.walk(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.0).position, Vec3::new(5.0, 0.0, 0.0)));

        reg.unregister(&spec("t.move.walk"));
        assert_eq!(m.walk(&reg, AVATAR, Pose::IDENTITY, 0.0, 0.0), Pose::IDENTITY);
    }
}

// ── Translate / snap-back / terrain scenario ──────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use crate::{Aabb, CollisionResolver, LastValid};

    const GROUND: f32 = 2.0;

    /// A: step 0.1 forward.  B: collision snap-back (final on hit).
    /// C: conform to terrain height.
    fn setup(last: &LastValid) -> (WalkManager, WalkerRegistry, Rc<RefCell<bool>>) {
        let mut reg = WalkerRegistry::new();
        reg.register(
            spec("s.forward.walk"),
            walker_fn(|_a, pose, _t, _d| {
                let step = pose.forward() * 0.1;
                Ok(WalkResult::pass(pose.translated(step)))
            }),
        );
        let wall = Aabb::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::new(5.0, 5.0, 2.0));
        reg.register(
            spec("s.collide.walk"),
            Box::new(CollisionResolver::new(0.25, vec![wall], last.clone())),
        );
        let terrain_ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&terrain_ran);
        reg.register(
            spec("s.terrain.walk"),
            walker_fn(move |_a, pose, _t, _d| {
                *flag.borrow_mut() = true;
                let mut p = pose;
                p.position.y = GROUND;
                Ok(WalkResult::pass(p))
            }),
        );
        let m = chain(&["s.forward.walk", "s.collide.walk", "s.terrain.walk"]);
        (m, reg, terrain_ran)
    }

    #[test]
    fn colliding_candidate_snaps_back_and_skips_terrain() {
        let last = LastValid::default();
        let valid = Pose::at(Vec3::new(0.0, GROUND, 0.5));
        last.record(AVATAR, valid);
        let (m, reg, terrain_ran) = setup(&last);

        // 0.7 + 0.1 = 0.8; the 0.25 sphere reaches past the wall face at z = 1.
        let candidate = Pose::at(Vec3::new(0.0, GROUND, 0.7));
        let out = m.walk(&reg, AVATAR, candidate, 0.0, 0.016);
        assert_eq!(out, valid);
        assert!(!*terrain_ran.borrow());
    }

    #[test]
    fn clear_candidate_is_terrain_conformed() {
        let last = LastValid::default();
        let (m, reg, terrain_ran) = setup(&last);

        let candidate = Pose::at(Vec3::new(0.0, 7.0, -3.0));
        let out = m.walk(&reg, AVATAR, candidate, 0.0, 0.016);
        assert!(close(out.position, Vec3::new(0.0, GROUND, -2.9)));
        assert!(*terrain_ran.borrow());
        // Collision recorded the clear pose (before terrain ran).
        let recorded = last.get(AVATAR).unwrap();
        assert!(close(recorded.position, Vec3::new(0.0, 7.0, -2.9)));
    }
}

// ── Stock walkers ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod stock_tests {
    use super::*;
    use crate::{Aabb, CollisionResolver, LastValid, Portal, StockConfig, register_defaults};

    fn config() -> StockConfig {
        StockConfig {
            kill_height:   -10.0,
            spawn:         Pose::at(Vec3::new(0.0, 1.0, 0.0)),
            avatar_radius: 0.5,
            portals:       vec![Portal {
                trigger: Aabb::new(Vec3::new(9.0, 0.0, 9.0), Vec3::new(11.0, 3.0, 11.0)),
                exit:    Pose::at(Vec3::new(100.0, 0.0, 100.0)),
            }],
            obstacles:     vec![Aabb::new(Vec3::new(2.0, 0.0, -1.0), Vec3::new(3.0, 2.0, 1.0))],
        }
    }

    fn stock() -> (WalkManager, WalkerRegistry, LastValid) {
        let mut reg = WalkerRegistry::new();
        let ledger = register_defaults(&mut reg, &config()).unwrap();
        (WalkManager::with_default_chain().unwrap(), reg, ledger)
    }

    #[test]
    fn aabb_queries() {
        let b = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(b.min, Vec3::ZERO);
        assert!(b.contains(Vec3::splat(0.5)));
        assert!(!b.contains(Vec3::splat(1.5)));
        assert!(b.overlaps(&Aabb::around(Vec3::splat(1.2), Vec3::splat(0.5))));
        assert!(!b.overlaps(&Aabb::around(Vec3::splat(3.0), Vec3::splat(0.5))));
        assert_eq!(b.closest_point(Vec3::new(2.0, 0.5, -1.0)), Vec3::new(1.0, 0.5, 0.0));
        assert!(b.intersects_sphere(Vec3::new(1.3, 0.5, 0.5), 0.5));
        assert!(!b.intersects_sphere(Vec3::new(1.6, 0.5, 0.5), 0.5));
    }

    #[test]
    fn broad_phase_skips_distant_obstacles() {
        let r = CollisionResolver::new(
            0.5,
            vec![Aabb::new(Vec3::splat(50.0), Vec3::splat(51.0))],
            LastValid::default(),
        );
        assert!(!r.collides(Vec3::ZERO));
        assert!(r.collides(Vec3::splat(50.5)));
    }

    #[test]
    fn portal_is_final_and_recorded() {
        let (m, reg, ledger) = stock();
        let trace = m.walk_traced(&reg, AVATAR, Pose::at(Vec3::new(10.0, 1.0, 10.0)), 0.0, 0.016);
        assert_eq!(trace.pose.position, Vec3::new(100.0, 0.0, 100.0));
        assert_eq!(trace.finalized_by, Some(spec("stock.portal.check")));
        assert_eq!(ledger.get(AVATAR), Some(trace.pose));
    }

    #[test]
    fn fall_respawns() {
        let (m, reg, _) = stock();
        let out = m.walk(&reg, AVATAR, Pose::at(Vec3::new(0.0, -11.0, 0.0)), 0.0, 0.016);
        assert_eq!(out, config().spawn);
    }

    #[test]
    fn collision_snaps_back_to_last_clear_pose() {
        let (m, reg, _) = stock();
        let clear = Pose::at(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(m.walk(&reg, AVATAR, clear, 0.0, 0.016), clear);

        let into_wall = Pose::at(Vec3::new(2.2, 1.0, 0.0));
        let trace = m.walk_traced(&reg, AVATAR, into_wall, 0.0, 0.016);
        assert_eq!(trace.pose, clear);
        assert_eq!(trace.finalized_by, Some(spec("stock.collision.resolve")));
    }

    #[test]
    fn collision_without_history_passes() {
        let (m, reg, _) = stock();
        let into_wall = Pose::at(Vec3::new(2.5, 1.0, 0.0));
        let trace = m.walk_traced(&reg, AvatarId(7), into_wall, 0.0, 0.016);
        assert_eq!(trace.pose, into_wall);
        assert!(trace.finalized_by.is_none());
    }

    #[test]
    fn ledger_forget() {
        let ledger = LastValid::default();
        ledger.record(AVATAR, Pose::IDENTITY);
        ledger.forget(AVATAR);
        assert_eq!(ledger.get(AVATAR), None);
    }
}
