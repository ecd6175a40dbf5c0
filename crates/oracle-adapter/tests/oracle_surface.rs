//! # Oracle Surface Tests
//!
//! End-to-end checks of the consumer-facing surface: feed in, `slot0` /
//! `observations` / `observe` out.

use std::io::Write;
use std::sync::Arc;

use feels_oracle_adapter::oracle::twap::{consult, twap_sqrt_price};
use feels_oracle_adapter::*;

const NOW: i64 = 1_700_000_000;
const ETH_USD: FeedId = FeedId::new([0x11; 32]);
const BTC_USD: FeedId = FeedId::new([0x22; 32]);

fn single(
    sample: PriceSample,
    adjustment: MarketAdjustment,
) -> SingleFeedAdapter<InMemoryFeed, FixedClock> {
    let feed = InMemoryFeed::with_samples([(ETH_USD, sample)]);
    let config = SingleFeedConfig::new(ETH_USD, StalenessPolicy::new(60), adjustment);
    SingleFeedAdapter::new(feed, FixedClock::new(NOW), config).unwrap()
}

fn exact_tick(value: f64) -> f64 {
    value.ln() / 1.0001f64.ln()
}

#[test]
fn test_identity_price_is_tick_zero() {
    let adapter = single(PriceSample::new(1, 0, NOW), MarketAdjustment::default());
    let slot0 = adapter.snapshot().unwrap();
    assert_eq!(slot0.tick, 0);
    assert_eq!(slot0.sqrt_price_x64, Q64);
}

#[test]
fn test_one_basis_point_is_tick_one() {
    let adapter = single(PriceSample::new(10_001, -4, NOW), MarketAdjustment::default());
    assert_eq!(adapter.snapshot().unwrap().tick, 1);
}

#[test]
fn test_tick_range_sweep() {
    // Mantissa/exponent pairs spanning roughly 1e-19..1e19
    let mantissas = [1i64, 3, 17, 271_828, 6_140_993_501, 9_999_999_999_999];
    let mut checked = 0;
    for mantissa in mantissas {
        for exponent in -32i32..=18 {
            let value = mantissa as f64 * 10f64.powi(exponent);
            let exact = exact_tick(value);
            if exact.abs() > (MAX_TICK - 1) as f64 {
                continue;
            }
            let sample = PriceSample::new(mantissa, exponent, NOW);
            let adapter = single(sample, MarketAdjustment::default());
            let tick = adapter.current_tick().unwrap();
            assert!(
                (tick as f64 - exact).abs() <= 1.0,
                "{}e{}: tick {} exact {}",
                mantissa,
                exponent,
                tick,
                exact
            );
            checked += 1;
        }
    }
    assert!(checked > 150);
}

#[test]
fn test_price_beyond_tick_range_rejected() {
    // 1e20 is above 1.0001^443636
    let adapter = single(PriceSample::new(1, 20, NOW), MarketAdjustment::default());
    assert!(matches!(adapter.snapshot(), Err(AdapterError::TickOutOfRange(t)) if t > MAX_TICK));

    let adapter = single(PriceSample::new(1, -20, NOW), MarketAdjustment::default());
    assert!(matches!(adapter.snapshot(), Err(AdapterError::TickOutOfRange(t)) if t < MIN_TICK));
}

#[test]
fn test_dual_matches_equivalent_single() {
    let feed = InMemoryFeed::with_samples([
        (ETH_USD, PriceSample::new(4000, 0, NOW)),
        (BTC_USD, PriceSample::new(2000, 0, NOW)),
    ]);
    let config = DualFeedConfig::new(ETH_USD, BTC_USD, StalenessPolicy::new(60), 0);
    let dual = DualFeedAdapter::new(feed, FixedClock::new(NOW), config).unwrap();

    let single = single(PriceSample::new(2, 0, NOW), MarketAdjustment::default());

    let dual_tick = dual.current_tick().unwrap();
    assert_eq!(dual_tick, single.current_tick().unwrap());
    assert!((dual_tick as f64 - exact_tick(2.0)).abs() <= 1.0);
    assert_eq!(dual.snapshot().unwrap(), single.snapshot().unwrap());
}

#[test]
fn test_dual_mixed_exponents() {
    // 4000.00 (expo -2) over 2000.000 (expo -3) is still 2.0
    let feed = InMemoryFeed::with_samples([
        (ETH_USD, PriceSample::new(400_000, -2, NOW)),
        (BTC_USD, PriceSample::new(2_000_000, -3, NOW)),
    ]);
    let config = DualFeedConfig::new(ETH_USD, BTC_USD, StalenessPolicy::new(60), 0);
    let dual = DualFeedAdapter::new(feed, FixedClock::new(NOW), config).unwrap();
    let reference = single(PriceSample::new(2, 0, NOW), MarketAdjustment::default());
    assert_eq!(dual.current_tick().unwrap(), reference.current_tick().unwrap());
}

#[test]
fn test_inversion_negates_tick() {
    for (mantissa, exponent) in [(2i64, 0i32), (6_140_993_501, -8), (3, -7), (10_001, -4)] {
        let sample = PriceSample::new(mantissa, exponent, NOW);
        let plain = single(sample, MarketAdjustment::default()).current_tick().unwrap();
        let inverted = single(
            sample,
            MarketAdjustment {
                decimal_difference: 0,
                invert: true,
            },
        )
        .current_tick()
        .unwrap();
        assert_eq!(inverted, -plain);
    }
}

#[test]
fn test_history_slope_is_current_tick() {
    let adapter = single(PriceSample::new(6_140_993_501, -8, NOW), MarketAdjustment::default());
    let tick = adapter.current_tick().unwrap() as i128;
    let indices = [0u16, 7, 1_000, 30_000, 65_533, 65_534];
    for &i in &indices {
        for &j in &indices {
            if i == j {
                continue;
            }
            let a = adapter.observation_at(i).unwrap();
            let b = adapter.observation_at(j).unwrap();
            let d_cum = b.tick_cumulative - a.tick_cumulative;
            let d_ts = (b.block_timestamp - a.block_timestamp) as i128;
            assert_eq!(d_cum, tick * d_ts);
        }
    }
}

#[test]
fn test_observe_lengths() {
    let adapter = single(PriceSample::new(5, -1, NOW), MarketAdjustment::default());

    let empty = adapter.observe_ages(&[]).unwrap();
    assert!(empty.tick_cumulatives.is_empty());
    assert!(empty.seconds_per_liquidity_cumulative_x128s.is_empty());

    let ages: Vec<u32> = (0..100).map(|i| i * 60).collect();
    let result = adapter.observe_ages(&ages).unwrap();
    assert_eq!(result.tick_cumulatives.len(), 100);
    assert_eq!(result.seconds_per_liquidity_cumulative_x128s.len(), 100);
    let tick = adapter.current_tick().unwrap() as i128;
    for (age, cumulative) in ages.iter().zip(&result.tick_cumulatives) {
        assert_eq!(*cumulative, tick * (NOW - *age as i64) as i128);
    }
    assert!(result.seconds_per_liquidity_cumulative_x128s.iter().all(|v| *v == 0));
}

#[test]
fn test_cardinality_bump_is_noop() {
    let adapter = single(PriceSample::new(2, 0, NOW), MarketAdjustment::default());
    let before = adapter.snapshot().unwrap();
    for next in [1u16, 16, u16::MAX] {
        adapter.bump_cardinality(next);
        assert_eq!(adapter.snapshot().unwrap(), before);
    }
    assert_eq!(before.observation_cardinality, 65_535);
    assert_eq!(before.observation_cardinality_next, 65_535);
}

#[test]
fn test_cardinality_bump_with_dead_feed() {
    // No feed read happens, so even an unusable adapter accepts it
    let config =
        SingleFeedConfig::new(ETH_USD, StalenessPolicy::new(60), MarketAdjustment::default());
    let adapter =
        SingleFeedAdapter::new(InMemoryFeed::new(), FixedClock::new(NOW), config).unwrap();
    adapter.bump_cardinality(16);
    assert!(adapter.snapshot().is_err());
}

#[test]
fn test_staleness_boundary() {
    let at_limit = single(PriceSample::new(2, 0, NOW - 60), MarketAdjustment::default());
    assert!(at_limit.snapshot().is_ok());

    let past_limit = single(PriceSample::new(2, 0, NOW - 61), MarketAdjustment::default());
    assert_eq!(
        past_limit.snapshot(),
        Err(AdapterError::StaleFeed {
            feed: ETH_USD,
            age: 61,
            max_age: 60
        })
    );
    assert!(past_limit.observe_ages(&[0]).is_err());
    assert!(past_limit.observation_at(0).is_err());
}

#[test]
fn test_clock_drives_staleness() {
    let clock = FixedClock::new(NOW);
    let feed = InMemoryFeed::with_samples([(ETH_USD, PriceSample::new(2, 0, NOW))]);
    let config =
        SingleFeedConfig::new(ETH_USD, StalenessPolicy::new(60), MarketAdjustment::default());
    let adapter = SingleFeedAdapter::new(feed, &clock, config).unwrap();

    clock.advance(60);
    assert!(adapter.snapshot().is_ok());
    clock.advance(1);
    assert!(matches!(adapter.snapshot(), Err(AdapterError::StaleFeed { age: 61, .. })));
}

#[test]
fn test_non_positive_price_rejected() {
    for mantissa in [0i64, -1, -6_140_993_501] {
        let adapter = single(PriceSample::new(mantissa, -8, NOW), MarketAdjustment::default());
        assert_eq!(
            adapter.snapshot(),
            Err(AdapterError::InvalidPrice {
                feed: ETH_USD,
                mantissa
            })
        );
    }
}

#[test]
fn test_stale_checked_before_sign() {
    let adapter = single(PriceSample::new(-5, 0, NOW - 3_600), MarketAdjustment::default());
    assert!(matches!(adapter.snapshot(), Err(AdapterError::StaleFeed { .. })));
}

#[test]
fn test_twap_equals_spot() {
    let adapter = single(PriceSample::new(6_140_993_501, -8, NOW), MarketAdjustment::default());
    let spot = adapter.snapshot().unwrap();
    for window in [1u32, 60, 1_800, 86_400] {
        assert_eq!(consult(&adapter, window).unwrap(), spot.tick);
        assert_eq!(twap_sqrt_price(&adapter, window).unwrap(), spot.sqrt_price_x64);
    }
}

#[test]
fn test_configured_adapter_dispatch() {
    let feed = Arc::new(InMemoryFeed::with_samples([
        (ETH_USD, PriceSample::new(4000, 0, NOW)),
        (BTC_USD, PriceSample::new(2000, 0, NOW)),
    ]));

    let single: ConfiguredAdapter<_, _> = SingleFeedAdapter::new(
        Arc::clone(&feed),
        FixedClock::new(NOW),
        SingleFeedConfig::new(ETH_USD, StalenessPolicy::new(60), MarketAdjustment::default()),
    )
    .unwrap()
    .into();
    let dual: ConfiguredAdapter<_, _> = DualFeedAdapter::new(
        Arc::clone(&feed),
        FixedClock::new(NOW),
        DualFeedConfig::new(ETH_USD, BTC_USD, StalenessPolicy::new(60), 0),
    )
    .unwrap()
    .into();

    let single_tick = single.current_tick().unwrap();
    assert!((single_tick as f64 - exact_tick(4000.0)).abs() <= 1.0);
    assert!((6_931..=6_932).contains(&dual.current_tick().unwrap()));
}

#[test]
fn test_snapshot_file_feed_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"parsed":[{{"id":"{}","price":{{
            "price":"200000000","conf":"1","expo":-8,"publish_time":{}
        }}}}]}}"#,
        hex::encode(ETH_USD.as_bytes()),
        NOW
    )
    .unwrap();
    file.flush().unwrap();

    let config =
        SingleFeedConfig::new(ETH_USD, StalenessPolicy::new(60), MarketAdjustment::default());
    let feed = SnapshotFileFeed::new(file.path());
    let adapter = SingleFeedAdapter::new(feed, FixedClock::new(NOW), config).unwrap();
    let reference = single(PriceSample::new(2, 0, NOW), MarketAdjustment::default());
    assert_eq!(adapter.snapshot().unwrap(), reference.snapshot().unwrap());
}

#[test]
fn test_adapters_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SingleFeedAdapter<InMemoryFeed, FixedClock>>();
    assert_send_sync::<DualFeedAdapter<Arc<InMemoryFeed>, SystemClock>>();
    assert_send_sync::<ConfiguredAdapter<SnapshotFileFeed, SystemClock>>();
}
