use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

struct CountingSource {
    total: usize,
    calls: Cell<usize>,
}

impl CountingSource {
    fn new(total: usize) -> Self {
        Self {
            total,
            calls: Cell::new(0),
        }
    }
}

impl DataSource for CountingSource {
    type Key = u64;

    fn total_row_count(&self) -> usize {
        self.total
    }

    fn rows(&self, start_index: usize, count: usize) -> Vec<Row<u64>> {
        self.calls.set(self.calls.get() + 1);
        let end = start_index.saturating_add(count).min(self.total);
        (start_index..end)
            .map(|i| Row::new(i, 10_000 + i as u64).with_type_name("Item"))
            .collect()
    }
}

fn opts() -> VirtualisationOptions {
    VirtualisationOptions::with_seq(0)
        .with_page_size(10)
        .with_overflow(20)
}

fn assert_prefix<K>(rows: &[Row<K>]) {
    for (pos, row) in rows.iter().enumerate() {
        assert_eq!(row.index, pos, "loaded rows must form a contiguous prefix");
    }
}

#[test]
fn initial_state_spans_overflow_plus_page() {
    let o = opts();
    let s = VirtualisationState::new(&o, 100);
    assert_eq!(s.range_start, 0);
    assert_eq!(s.range_end, 30);
    assert_eq!(s.loaded_count, 0);
    assert!(s.is_consistent());
}

#[test]
fn initial_range_end_is_clamped_for_small_totals() {
    let o = opts();
    let s = VirtualisationState::new(&o, 5);
    assert_eq!(s.range_end, 6);
    assert!(s.is_consistent());

    let empty = VirtualisationState::new(&o, 0);
    assert_eq!(empty.range_end, 1);
    assert!(empty.is_consistent());
}

#[test]
fn lower_crossing_recenters_range() {
    let o = opts();
    let s = VirtualisationState::new(&o, 100);
    let next = lower_boundary_crossed(&s, &o, 35).unwrap();
    assert_eq!(next.range_start, 15);
    assert_eq!(next.range_end, 45);
    assert_eq!(next.total_count, 100);
}

#[test]
fn upper_crossing_recenters_range() {
    let o = opts();
    let s = VirtualisationState::new(&o, 100);
    let s = lower_boundary_crossed(&s, &o, 35).unwrap();
    let next = upper_boundary_crossed(&s, &o, 16).unwrap();
    assert_eq!(next.range_start, 6);
    assert_eq!(next.range_end, 36);
}

#[test]
fn upper_crossing_never_shrinks_below_initial_window() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 8,
        range_end: 40,
        loaded_count: 0,
        total_count: 100,
    };
    let next = upper_boundary_crossed(&s, &o, 2).unwrap();
    assert_eq!(next.range_start, 0);
    assert_eq!(next.range_end, 30);
}

#[test]
fn lower_crossing_is_clamped_to_total_plus_one() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 70,
        range_end: 95,
        loaded_count: 0,
        total_count: 100,
    };
    let next = lower_boundary_crossed(&s, &o, 98).unwrap();
    assert_eq!(next.range_end, 101);
    assert_eq!(next.range_start, 78);
}

#[test]
fn stale_crossings_are_rejected() {
    let o = opts();
    let s = VirtualisationState::new(&o, 100);

    // Below sentinel at or before range_end - overflow / 2.
    assert_eq!(lower_boundary_crossed(&s, &o, 20), None);
    assert_eq!(lower_boundary_crossed(&s, &o, 0), None);
    // Past the data.
    assert_eq!(lower_boundary_crossed(&s, &o, 101), None);
    // Nothing above the range to re-render.
    assert_eq!(upper_boundary_crossed(&s, &o, 10), None);

    let s = lower_boundary_crossed(&s, &o, 35).unwrap();
    assert_eq!(upper_boundary_crossed(&s, &o, 25), None);
    assert_eq!(upper_boundary_crossed(&s, &o, 90), None);
}

#[test]
fn same_crossing_twice_mutates_once() {
    let o = opts();
    let s0 = VirtualisationState::new(&o, 100);
    let s1 = lower_boundary_crossed(&s0, &o, 35).unwrap();
    assert_eq!(lower_boundary_crossed(&s1, &o, 35), None);

    let s2 = upper_boundary_crossed(&s1, &o, 16).unwrap();
    assert_eq!(upper_boundary_crossed(&s2, &o, 16), None);
}

#[test]
fn zero_overflow_still_advances() {
    let o = opts().with_overflow(0);
    let s = VirtualisationState::new(&o, 50);
    assert_eq!(s.range_end, 10);
    let next = lower_boundary_crossed(&s, &o, 11).unwrap();
    assert_eq!(next.range_end, 11);
    assert_eq!(next.range_start, 1);
    assert_eq!(lower_boundary_crossed(&next, &o, 11), None);
    assert_eq!(upper_boundary_crossed(&next, &o, 1), None);
    let back = upper_boundary_crossed(&next, &o, 0).unwrap();
    assert_eq!((back.range_start, back.range_end), (0, 10));
}

#[test]
fn boundary_crossed_dispatches() {
    let o = opts();
    let s = VirtualisationState::new(&o, 100);
    assert_eq!(
        boundary_crossed(&s, &o, Boundary::Lower, 35),
        lower_boundary_crossed(&s, &o, 35)
    );
    assert_eq!(boundary_crossed(&s, &o, Boundary::Upper, 3), None);
}

#[test]
fn property_random_crossings_preserve_invariants() {
    let mut rng = Lcg::new(0x5eed_1234);
    for _case in 0..200 {
        let total = rng.gen_range_usize(0, 500);
        let o = VirtualisationOptions::with_seq(0)
            .with_page_size(rng.gen_range_usize(1, 40))
            .with_overflow(rng.gen_range_usize(0, 60));
        let mut s = VirtualisationState::new(&o, total);
        assert!(s.is_consistent(), "{s:?}");

        for _step in 0..200 {
            let boundary = if rng.gen_bool() {
                Boundary::Upper
            } else {
                Boundary::Lower
            };
            // Mostly indexes near the current range, sometimes anywhere.
            let index = if rng.gen_bool() {
                let lo = s.range_start.saturating_sub(o.overflow);
                let hi = s.range_end.saturating_add(o.overflow).saturating_add(1);
                rng.gen_range_usize(lo, hi)
            } else {
                rng.gen_range_usize(0, total + 50)
            };

            if let Some(next) = boundary_crossed(&s, &o, boundary, index) {
                assert!(
                    next.is_consistent(),
                    "boundary={boundary:?} index={index} from={s:?} to={next:?}"
                );
                assert_eq!(next.total_count, s.total_count);
                assert_eq!(next.loaded_count, s.loaded_count);
                // Replaying the crossing never moves the range again.
                let replay = boundary_crossed(&next, &o, boundary, index);
                assert!(replay.is_none_or(|r| r == next), "replay={replay:?}");
                s = next;
            }
        }
    }
}

#[test]
fn parse_row_index_accepts_non_negative_integers() {
    assert_eq!(parse_row_index("0"), Ok(0));
    assert_eq!(parse_row_index("35"), Ok(35));
    assert_eq!(parse_row_index(" 16\n"), Ok(16));
}

#[test]
fn parse_row_index_rejects_malformed_payloads() {
    assert_eq!(
        parse_row_index("-1"),
        Err(IndexParseError::Negative(String::from("-1")))
    );
    assert_eq!(parse_row_index(""), Err(IndexParseError::Empty));
    assert_eq!(parse_row_index("   "), Err(IndexParseError::Empty));
    assert!(matches!(
        parse_row_index("row-3"),
        Err(IndexParseError::NotAnInteger(_))
    ));
    assert!(matches!(
        parse_row_index("1.5"),
        Err(IndexParseError::NotAnInteger(_))
    ));
    assert!(matches!(
        parse_row_index("99999999999999999999999999"),
        Err(IndexParseError::NotAnInteger(_))
    ));
}

#[test]
fn index_parse_error_messages() {
    assert_eq!(
        format!("{}", IndexParseError::Negative(String::from("-4"))),
        "negative row index: \"-4\""
    );
    assert_eq!(format!("{}", IndexParseError::Empty), "empty row index");
}

#[test]
fn debouncer_fires_once_after_delay() {
    let d = Debouncer::new(250);
    let t = d.arm(1_000);
    assert_eq!(d.due_ms(), Some(1_250));
    assert_eq!(d.poll(1_100), None);
    assert_eq!(d.poll(1_249), None);
    assert_eq!(d.poll(1_250), Some(t));
    assert_eq!(d.poll(1_251), None);
    assert!(!d.is_pending());
}

#[test]
fn debouncer_rearm_cancels_previous() {
    let d = Debouncer::new(250);
    let first = d.arm(0);
    let second = d.arm(200);
    assert_ne!(first, second);
    assert_eq!(d.pending_ticket(), Some(second));
    // The first deadline passes without firing.
    assert_eq!(d.poll(260), None);
    assert_eq!(d.poll(450), Some(second));
}

#[test]
fn debouncer_cancel_is_idempotent() {
    let d = Debouncer::new(10);
    let t = d.arm(0);
    assert_eq!(d.cancel(), Some(t));
    assert_eq!(d.cancel(), None);
    assert_eq!(d.poll(1_000), None);
}

#[test]
fn gate_drops_reentrant_updates() {
    let gate = ScrollGate::new(250);
    let mut inner_ran = false;
    let outer = gate.run(0, || {
        assert!(gate.is_busy());
        let inner = gate.run(0, || {
            inner_ran = true;
            Some(())
        });
        assert_eq!(inner, None);
        Some(1)
    });
    assert!(!inner_ran);
    assert!(matches!(outer, Some(GateRun::Changed { value: 1, .. })));
    assert!(!gate.is_busy());
}

#[test]
fn gate_arms_refresh_only_for_changes() {
    let gate = ScrollGate::new(250);
    assert_eq!(gate.run(0, || None::<()>), Some(GateRun::Unchanged));
    assert!(!gate.debouncer().is_pending());

    let run = gate.run(5, || Some(()));
    let Some(GateRun::Changed { ticket, .. }) = run else {
        panic!("expected a change, got {run:?}");
    };
    assert_eq!(gate.poll_refresh(255), Some(ticket));
}

#[test]
fn gate_reopens_after_panicking_update() {
    let gate = ScrollGate::new(250);
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        gate.run(0, || -> Option<()> { panic!("range computation failed") })
    }));
    assert!(res.is_err());
    assert!(!gate.is_busy());
    assert!(gate.run(1, || Some(())).is_some());
}

#[test]
fn burst_of_crossings_coalesces_into_one_refresh() {
    let o = opts();
    let gate = ScrollGate::new(o.refresh_delay_ms);
    let mut state = VirtualisationState::new(&o, 1_000);
    let mut last_ticket = None;

    for (i, index) in [35usize, 50, 62, 80, 95].into_iter().enumerate() {
        let now_ms = i as u64 * 40;
        let run = gate.run(now_ms, || lower_boundary_crossed(&state, &o, index));
        if let Some(GateRun::Changed { value, ticket }) = run {
            state = value;
            last_ticket = Some(ticket);
        }
        assert_eq!(gate.poll_refresh(now_ms), None);
    }

    let mut fired = Vec::new();
    for now_ms in (160..1_000).step_by(10) {
        if let Some(t) = gate.poll_refresh(now_ms) {
            fired.push(t);
        }
    }
    assert_eq!(fired.len(), 1);
    assert_eq!(Some(fired[0]), last_ticket);
    assert_eq!(state.range_end, 105);
}

#[test]
fn first_page_includes_overflow_and_is_clamped() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(25);
    let mut loader = IncrementalLoader::new(&o);

    assert_eq!(
        loader.begin_next_page(25),
        Some(PageRequest {
            start: 0,
            count: 25
        })
    );
    assert!(loader.is_loading());
    let rows = source.rows(0, 25);
    assert_eq!(loader.complete(PageRequest { start: 0, count: 25 }, rows), 25);
    assert_eq!(loader.loaded_count(), 25);

    assert_eq!(loader.load_next_page(&source), 0);
    assert_eq!(source.calls.get(), 1);
}

#[test]
fn pages_grow_with_loaded_count() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(1_000);
    let mut loader = IncrementalLoader::new(&o);

    assert_eq!(loader.load_next_page(&source), 30);
    // limit = loaded + page_size
    assert_eq!(loader.load_next_page(&source), 40);
    assert_eq!(loader.load_next_page(&source), 80);
    assert_eq!(loader.loaded_count(), 150);
    assert_prefix(loader.rows());
}

#[test]
fn begin_is_ignored_while_loading() {
    let o = opts().with_load_on_demand(true);
    let mut loader = IncrementalLoader::<u64>::new(&o);
    let req = loader.begin_next_page(100).unwrap();
    assert_eq!(loader.begin_next_page(100), None);
    assert_eq!(loader.begin_target_row(50, 100), None);
    assert!(loader.abort(req));
    assert!(!loader.is_loading());
    assert_eq!(loader.loaded_count(), 0);
    assert_eq!(loader.begin_next_page(100), Some(req));
}

#[test]
fn completion_for_unknown_request_is_ignored() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(100);
    let mut loader = IncrementalLoader::new(&o);
    let req = loader.begin_next_page(100).unwrap();
    let bogus = PageRequest { start: 5, count: 3 };
    assert_eq!(loader.complete(bogus, source.rows(5, 3)), 0);
    assert!(!loader.abort(bogus));
    assert!(loader.is_loading());
    assert_eq!(loader.complete(req, source.rows(req.start, req.count)), 30);
}

#[test]
fn misindexed_rows_do_not_break_the_prefix() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(100);
    let mut loader = IncrementalLoader::new(&o);
    let req = loader.begin_next_page(100).unwrap();

    // Rows 0..5 are fine, then the source skips ahead.
    let mut rows = source.rows(0, 5);
    rows.extend(source.rows(40, 10));
    assert_eq!(loader.complete(req, rows), 5);
    assert_eq!(loader.loaded_count(), 5);
    assert!(!loader.is_loading());
    assert_prefix(loader.rows());

    let req = loader.begin_next_page(100).unwrap();
    assert_eq!(req.start, 5);
    assert_eq!(loader.complete(req, source.rows(6, req.count)), 0);
    assert_eq!(loader.load_next_page(&source), 15);
    assert_prefix(loader.rows());
}

#[test]
fn short_pages_keep_the_prefix_contiguous() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(100);
    let mut loader = IncrementalLoader::new(&o);
    let req = loader.begin_next_page(100).unwrap();
    assert_eq!(loader.complete(req, source.rows(0, 7)), 7);
    assert_eq!(loader.loaded_count(), 7);
    assert_eq!(loader.load_next_page(&source), 17);
    assert_prefix(loader.rows());
}

#[test]
fn target_row_loads_exactly_one_row_at_the_edge() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(100);
    let mut loader = IncrementalLoader::new(&o);
    loader.load_next_page(&source);

    assert_eq!(loader.load_target_row(&source, 30), 1);
    assert_eq!(loader.loaded_count(), 31);
    assert_eq!(loader.rows()[30].identity, 10_030);
}

#[test]
fn target_row_beyond_prefix_fills_the_gap() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(100);
    let mut loader = IncrementalLoader::new(&o);

    assert_eq!(
        loader.begin_target_row(42, 100),
        Some(PageRequest {
            start: 0,
            count: 43
        })
    );
    loader.abort(PageRequest {
        start: 0,
        count: 43,
    });
    assert_eq!(loader.load_target_row(&source, 42), 43);
    assert_prefix(loader.rows());
}

#[test]
fn target_row_already_loaded_or_out_of_bounds_is_a_no_op() {
    let o = opts().with_load_on_demand(true);
    let source = CountingSource::new(100);
    let mut loader = IncrementalLoader::new(&o);
    loader.load_next_page(&source);
    let calls = source.calls.get();

    assert_eq!(loader.load_target_row(&source, 3), 0);
    assert_eq!(loader.load_target_row(&source, 100), 0);
    assert_eq!(loader.load_target_row(&source, 5_000), 0);
    assert_eq!(source.calls.get(), calls);
}

#[test]
fn property_loading_is_monotonic_and_contiguous() {
    let mut rng = Lcg::new(42);
    for _case in 0..100 {
        let total = rng.gen_range_usize(0, 400);
        let o = VirtualisationOptions::with_seq(0)
            .with_page_size(rng.gen_range_usize(1, 30))
            .with_overflow(rng.gen_range_usize(0, 40))
            .with_load_on_demand(true);
        let source = CountingSource::new(total);
        let mut loader = IncrementalLoader::new(&o);
        let mut prev = 0;

        for _step in 0..30 {
            if rng.gen_bool() {
                loader.load_next_page(&source);
            } else {
                let target = rng.gen_range_usize(0, total + 10);
                loader.load_target_row(&source, target);
            }
            let loaded = loader.loaded_count();
            assert!(loaded >= prev);
            assert!(loaded <= total);
            prev = loaded;
        }
        assert_prefix(loader.rows());
    }
}

#[test]
fn rows_in_range_render_full_and_others_skeleton() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 15,
        range_end: 45,
        loaded_count: 100,
        total_count: 100,
    };
    assert_eq!(classify_row(&s, &o, 14).mode, RenderMode::Skeleton);
    assert_eq!(classify_row(&s, &o, 15).mode, RenderMode::Full);
    assert_eq!(classify_row(&s, &o, 46).mode, RenderMode::Full);
    assert_eq!(classify_row(&s, &o, 47).mode, RenderMode::Skeleton);
    assert!(classify_row(&s, &o, 16).is_even);
    assert!(!classify_row(&s, &o, 17).is_even);
}

#[test]
fn sentinels_sit_next_to_each_boundary() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 15,
        range_end: 45,
        loaded_count: 100,
        total_count: 100,
    };
    let above: Vec<usize> = (0..100)
        .filter(|&i| classify_row(&s, &o, i).above_sentinel)
        .collect();
    let below: Vec<usize> = (0..100)
        .filter(|&i| classify_row(&s, &o, i).below_sentinel)
        .collect();
    assert_eq!(above, (0..=25).collect::<Vec<_>>());
    assert_eq!(below, (35..=90).collect::<Vec<_>>());
}

#[test]
fn skeleton_rows_outside_the_range_carry_sentinels() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 15,
        range_end: 45,
        loaded_count: 100,
        total_count: 100,
    };
    let far_above = classify_row(&s, &o, 5);
    assert_eq!(far_above.mode, RenderMode::Skeleton);
    assert!(far_above.above_sentinel && !far_above.below_sentinel);

    let far_below = classify_row(&s, &o, 80);
    assert_eq!(far_below.mode, RenderMode::Skeleton);
    assert!(far_below.below_sentinel && !far_below.above_sentinel);

    // A viewport landing on either one recenters the range around it.
    let down = lower_boundary_crossed(&s, &o, 80).unwrap();
    assert_eq!(classify_row(&down, &o, 80).mode, RenderMode::Full);
    let up = upper_boundary_crossed(&s, &o, 5).unwrap();
    assert_eq!(classify_row(&up, &o, 5).mode, RenderMode::Full);
}

#[test]
fn narrow_range_merges_the_bands() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 40,
        range_end: 45,
        loaded_count: 100,
        total_count: 100,
    };
    let mut got = Vec::new();
    for_each_sentinel_row(&s, &o, 100, |c| got.push(c.index));
    assert_eq!(got, (0..=90).collect::<Vec<_>>());
    let both = classify_row(&s, &o, 42);
    assert!(both.above_sentinel && both.below_sentinel);
}

#[test]
fn no_above_sentinel_at_the_top() {
    let o = opts();
    let s = VirtualisationState::new(&o, 100);
    assert!((0..100).all(|i| !classify_row(&s, &o, i).above_sentinel));
    assert!(classify_row(&s, &o, 20).below_sentinel);
    assert!(!classify_row(&s, &o, 19).below_sentinel);
}

#[test]
fn no_below_sentinel_near_the_end() {
    let o = opts();
    let s = VirtualisationState {
        range_start: 80,
        range_end: 101,
        loaded_count: 100,
        total_count: 100,
    };
    assert!((0..100).all(|i| !classify_row(&s, &o, i).below_sentinel));

    let tiny = VirtualisationState::new(&o, 4);
    assert!((0..4).all(|i| !classify_row(&tiny, &o, i).below_sentinel));
}

#[test]
fn load_on_demand_rows_are_full_without_boundary_sentinels() {
    let o = opts().with_load_on_demand(true);
    let s = VirtualisationState::new(&o, 100);
    for i in 0..100 {
        let class = classify_row(&s, &o, i);
        assert_eq!(class.mode, RenderMode::Full);
        assert!(!class.has_sentinel());
    }
    let mut n = 0;
    for_each_sentinel_row(&s, &o, 100, |_| n += 1);
    assert_eq!(n, 0);
}

#[test]
fn for_each_sentinel_row_matches_full_scan() {
    let mut rng = Lcg::new(7);
    for _case in 0..100 {
        let total = rng.gen_range_usize(0, 300);
        let o = VirtualisationOptions::with_seq(0)
            .with_page_size(rng.gen_range_usize(1, 20))
            .with_overflow(rng.gen_range_usize(0, 40));
        let mut s = VirtualisationState::new(&o, total);
        for step in 0..6 {
            let index = rng.gen_range_usize(0, total + 1);
            let next = if step % 3 == 2 {
                upper_boundary_crossed(&s, &o, index)
            } else {
                lower_boundary_crossed(&s, &o, index)
            };
            if let Some(next) = next {
                s = next;
            }
        }

        let expected: Vec<RowClass> = (0..total)
            .map(|i| classify_row(&s, &o, i))
            .filter(RowClass::has_sentinel)
            .collect();
        let mut got = Vec::new();
        for_each_sentinel_row(&s, &o, total, |c| got.push(c));
        assert_eq!(got, expected);
    }
}

#[test]
fn options_defaults() {
    let o = VirtualisationOptions::with_seq(7);
    assert_eq!(o.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(o.overflow, DEFAULT_OVERFLOW);
    assert!(!o.is_load_on_demand);
    assert_eq!(o.refresh_delay_ms, 250);
    assert_eq!(o.grid_id, "sentinel-grid-7");
    assert_eq!(o.scroll_sentinel_id, "sentinel-grid-7-scroll");
    assert_eq!(o.above_sentinel_id, "sentinel-grid-7-above");
    assert_eq!(o.below_sentinel_id, "sentinel-grid-7-below");
}

#[test]
fn generated_grid_ids_are_unique_per_instance() {
    let a = VirtualisationOptions::new();
    let b = VirtualisationOptions::default();
    assert_ne!(a.grid_id, b.grid_id);
    assert_ne!(a.below_sentinel_id, b.below_sentinel_id);
}

#[test]
fn grid_id_override_carries_generated_sentinel_ids_along() {
    let o = VirtualisationOptions::with_seq(1)
        .with_above_sentinel_id("custom-above")
        .with_grid_id("orders");
    assert_eq!(o.grid_id, "orders");
    assert_eq!(o.scroll_sentinel_id, "orders-scroll");
    assert_eq!(o.below_sentinel_id, "orders-below");
    assert_eq!(o.above_sentinel_id, "custom-above");
}

#[test]
fn page_size_is_at_least_one() {
    let o = VirtualisationOptions::with_seq(0).with_page_size(0);
    assert_eq!(o.page_size, 1);
}

#[test]
fn row_builders() {
    let row = Row::new(3, 99u64)
        .with_type_name("Order")
        .with_hidden(true)
        .with_columns(alloc::vec![Column::new(0, "120px"), Column::new(1, "20%")]);
    assert_eq!(row.index, 3);
    assert_eq!(row.identity, 99);
    assert_eq!(row.type_name, "Order");
    assert!(row.hidden);
    assert_eq!(row.columns[1].width, "20%");
    assert_eq!(row.columns[1].column_index, 1);
}

#[test]
fn example_basic_smoke() {
    let o = opts();
    let mut s = VirtualisationState::new(&o, 10_000);
    let gate = ScrollGate::new(o.refresh_delay_ms);

    let mut now_ms = 0u64;
    for _ in 0..50 {
        // The first below sentinel the viewport meets past the rendered end.
        let mut below = None;
        for_each_sentinel_row(&s, &o, s.total_count, |c| {
            if c.below_sentinel && c.index >= s.range_end && below.is_none() {
                below = Some(c.index);
            }
        });
        let index = below.unwrap();
        if let Some(GateRun::Changed { value, .. }) =
            gate.run(now_ms, || lower_boundary_crossed(&s, &o, index))
        {
            s = value;
        }
        now_ms += 300;
        gate.poll_refresh(now_ms);
    }
    assert!(s.range_start > 0);
    assert!(s.is_consistent());
}
