// ═══════════════════════════════════════════════════════════════════
// Service Tests — LedgerService, SnapshotService, ChartService,
// CurrencyService
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;

use chrono::{Days, NaiveDate, Utc};
use dca_ledger_core::errors::CoreError;
use dca_ledger_core::models::chart::Timeframe;
use dca_ledger_core::models::ledger::Ledger;
use dca_ledger_core::models::transaction::{Transaction, TransactionSortOrder};
use dca_ledger_core::services::chart_service::ChartService;
use dca_ledger_core::services::currency_service::CurrencyService;
use dca_ledger_core::services::ledger_service::LedgerService;
use dca_ledger_core::services::snapshot_service::SnapshotService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn tx(date: NaiveDate, amount: f64, btc: f64) -> Transaction {
    Transaction::new(date, amount, btc, None)
}

fn tx_rate(date: NaiveDate, amount: f64, btc: f64, rate: f64) -> Transaction {
    Transaction::new(date, amount, btc, Some(rate))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService
// ═══════════════════════════════════════════════════════════════════

mod ledger_service {
    use super::*;

    fn sample_ledger() -> Ledger {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        svc.add_transaction(&mut ledger, tx_rate(d(2025, 3, 1), 200.0, 0.002, 100_000.0)).unwrap();
        svc.add_transaction(&mut ledger, tx_rate(d(2025, 1, 1), 500.0, 0.004, 125_000.0)).unwrap();
        svc.add_transaction(&mut ledger, tx_rate(d(2025, 2, 1), 50.0, 0.0005, 100_000.0)).unwrap();
        ledger
    }

    #[test]
    fn add_keeps_date_order() {
        let ledger = sample_ledger();
        let dates: Vec<NaiveDate> = ledger.transactions.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 2, 1), d(2025, 3, 1)]);
    }

    #[test]
    fn same_date_keeps_insertion_order() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let a = tx(d(2025, 1, 1), 10.0, 0.0001);
        let b = tx(d(2025, 1, 1), 20.0, 0.0002);
        let (a_id, b_id) = (a.id, b.id);
        svc.add_transaction(&mut ledger, a).unwrap();
        svc.add_transaction(&mut ledger, b).unwrap();
        assert_eq!(ledger.transactions[0].id, a_id);
        assert_eq!(ledger.transactions[1].id, b_id);
    }

    #[test]
    fn rejects_non_positive_amount() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        for amount in [0.0, -5.0, f64::NAN] {
            let err = svc
                .add_transaction(&mut ledger, tx(d(2025, 1, 1), amount, 0.001))
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)));
        }
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn rejects_non_positive_btc() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let err = svc
            .add_transaction(&mut ledger, tx(d(2025, 1, 1), 100.0, 0.0))
            .unwrap_err();
        assert!(err.to_string().contains("BTC received must be positive"));
    }

    #[test]
    fn rejects_negative_rate() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let err = svc
            .add_transaction(&mut ledger, tx_rate(d(2025, 1, 1), 100.0, 0.001, -1.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn rejects_far_future_date() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let future = Utc::now().date_naive() + Days::new(5);
        let err = svc
            .add_transaction(&mut ledger, tx(future, 100.0, 0.001))
            .unwrap_err();
        assert!(err.to_string().contains("in the future"));
    }

    #[test]
    fn accepts_tomorrow() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let tomorrow = Utc::now().date_naive() + Days::new(1);
        svc.add_transaction(&mut ledger, tx(tomorrow, 100.0, 0.001)).unwrap();
        assert_eq!(ledger.transactions.len(), 1);
    }

    #[test]
    fn remove_returns_transaction() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let id = ledger.transactions[1].id;
        let removed = svc.remove_transaction(&mut ledger, id).unwrap();
        assert_eq!(removed.date, d(2025, 2, 1));
        assert_eq!(ledger.transactions.len(), 2);
    }

    #[test]
    fn rejects_duplicate_id() {
        let svc = LedgerService::new();
        let mut ledger = Ledger::new();
        let original = tx(d(2025, 1, 1), 100.0, 0.001);
        let copy = original.clone();
        svc.add_transaction(&mut ledger, original).unwrap();

        let err = svc.add_transaction(&mut ledger, copy).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(ref m) if m.contains("already in the ledger")));
        assert_eq!(ledger.transactions.len(), 1);
    }

    #[test]
    fn remove_unknown_id_fails() {
        let svc = LedgerService::new();
        let mut ledger = sample_ledger();
        let err = svc
            .remove_transaction(&mut ledger, uuid::Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, CoreError::TransactionNotFound(_)));
        assert_eq!(ledger.transactions.len(), 3);
    }

    #[test]
    fn get_transactions_is_newest_first() {
        let svc = LedgerService::new();
        let ledger = sample_ledger();
        let dates: Vec<NaiveDate> = svc.get_transactions(&ledger).iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![d(2025, 3, 1), d(2025, 2, 1), d(2025, 1, 1)]);
    }

    #[test]
    fn sort_by_amount() {
        let svc = LedgerService::new();
        let ledger = sample_ledger();
        let desc: Vec<f64> = svc
            .get_sorted(&ledger, &TransactionSortOrder::AmountDesc)
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(desc, vec![500.0, 200.0, 50.0]);

        let asc: Vec<f64> = svc
            .get_sorted(&ledger, &TransactionSortOrder::AmountAsc)
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(asc, vec![50.0, 200.0, 500.0]);
    }

    #[test]
    fn sort_by_price_is_stable() {
        let svc = LedgerService::new();
        let ledger = sample_ledger();
        let asc: Vec<NaiveDate> = svc
            .get_sorted(&ledger, &TransactionSortOrder::PriceAsc)
            .iter()
            .map(|t| t.date)
            .collect();
        // Both 100k purchases keep their date order
        assert_eq!(asc, vec![d(2025, 2, 1), d(2025, 3, 1), d(2025, 1, 1)]);

        let top = svc.get_sorted(&ledger, &TransactionSortOrder::PriceDesc);
        assert_eq!(top[0].date, d(2025, 1, 1));
    }

    #[test]
    fn timeframe_filter_uses_calendar_months() {
        let svc = LedgerService::new();
        let txs = vec![
            tx(d(2024, 3, 1), 10.0, 0.0001),
            tx(d(2024, 12, 31), 10.0, 0.0001),
            tx(d(2025, 2, 15), 10.0, 0.0001),
            tx(d(2025, 3, 15), 10.0, 0.0001),
            tx(d(2025, 3, 1), 10.0, 0.0001),
        ];
        let today = d(2025, 3, 31);

        let count = |tf| svc.filter_by_timeframe(&txs, tf, today).len();
        // 1M cutoff is 2025-02-28
        assert_eq!(count(Timeframe::OneMonth), 2);
        // 3M cutoff is 2024-12-31, inclusive
        assert_eq!(count(Timeframe::ThreeMonths), 4);
        assert_eq!(count(Timeframe::SixMonths), 4);
        assert_eq!(count(Timeframe::OneYear), 4);
        assert_eq!(count(Timeframe::All), 5);
    }

    #[test]
    fn timeframe_filter_is_oldest_first() {
        let svc = LedgerService::new();
        let txs = vec![
            tx(d(2025, 3, 15), 10.0, 0.0001),
            tx(d(2025, 3, 1), 10.0, 0.0001),
        ];
        let dates: Vec<NaiveDate> = svc
            .filter_by_timeframe(&txs, Timeframe::All, d(2025, 4, 1))
            .iter()
            .map(|t| t.date)
            .collect();
        assert_eq!(dates, vec![d(2025, 3, 1), d(2025, 3, 15)]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// SnapshotService
// ═══════════════════════════════════════════════════════════════════

mod snapshot_service {
    use super::*;

    #[test]
    fn unrealized_pnl() {
        let svc = SnapshotService::new();
        let txs = vec![tx(d(2025, 1, 6), 1000.0, 0.01)];
        let snap = svc.compute_snapshot(&txs, 150_000.0, d(2025, 1, 7));
        assert!(approx(snap.current_value, 1500.0));
        assert!(approx(snap.unrealized_pnl_percent, 50.0));
        assert_eq!(snap.total_transactions, 1);
        assert_eq!(snap.longest_streak_weeks, 1);
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        let svc = SnapshotService::new();
        let snap = svc.compute_snapshot(&[], 100_000.0, d(2025, 1, 1));
        assert_eq!(snap.total_btc, 0.0);
        assert_eq!(snap.total_invested, 0.0);
        assert_eq!(snap.unrealized_pnl_percent, 0.0);
        assert_eq!(snap.max_drawdown_percent, 0.0);
        assert_eq!(snap.longest_streak_weeks, 0);
    }

    #[test]
    fn zero_price_means_total_loss() {
        let svc = SnapshotService::new();
        let txs = vec![tx(d(2025, 1, 6), 1000.0, 0.01)];
        let snap = svc.compute_snapshot(&txs, 0.0, d(2025, 1, 7));
        assert_eq!(snap.current_value, 0.0);
        assert!(approx(snap.unrealized_pnl_percent, -100.0));
    }

    #[test]
    fn streak_feeds_snapshot() {
        let svc = SnapshotService::new();
        let txs: Vec<Transaction> = (0..5)
            .map(|i| tx(d(2025, 1, 6) + Days::new(7 * i), 100.0, 0.001))
            .collect();
        let snap = svc.compute_snapshot(&txs, 100_000.0, d(2025, 2, 4));
        assert_eq!(snap.longest_streak_weeks, 5);
    }

    #[test]
    fn drawdown_from_purchase_prices() {
        let svc = SnapshotService::new();
        let txs = vec![
            tx_rate(d(2025, 1, 1), 100.0, 0.001, 100_000.0),
            tx_rate(d(2025, 2, 1), 75.0, 0.001, 75_000.0),
        ];
        assert!(approx(svc.max_drawdown_percent(&txs, 90_000.0), 25.0));
    }

    #[test]
    fn drawdown_includes_current_price() {
        let svc = SnapshotService::new();
        let txs = vec![tx_rate(d(2025, 1, 1), 100.0, 0.001, 100_000.0)];
        assert!(approx(svc.max_drawdown_percent(&txs, 60_000.0), 40.0));
        assert_eq!(svc.max_drawdown_percent(&txs, 120_000.0), 0.0);
    }

    #[test]
    fn drawdown_follows_date_not_input_order() {
        let svc = SnapshotService::new();
        // Rising prices in date order, given newest first
        let txs = vec![
            tx_rate(d(2025, 3, 1), 100.0, 0.001, 90_000.0),
            tx_rate(d(2025, 1, 1), 100.0, 0.001, 50_000.0),
        ];
        assert_eq!(svc.max_drawdown_percent(&txs, 95_000.0), 0.0);
    }

    #[test]
    fn drawdown_unlocks_diamond_hands() {
        let svc = SnapshotService::new();
        let txs = vec![tx_rate(d(2025, 1, 1), 100.0, 0.001, 100_000.0)];
        let snap = svc.compute_snapshot(&txs, 70_000.0, d(2025, 1, 2));
        assert!(approx(snap.max_drawdown_percent, 30.0));
    }

    #[test]
    fn metrics() {
        let svc = SnapshotService::new();
        let txs = vec![
            tx(d(2025, 2, 1), 300.0, 0.003),
            tx(d(2025, 1, 1), 100.0, 0.002),
        ];
        let m = svc.compute_metrics(&txs);
        assert!(approx(m.total_invested, 400.0));
        assert!(approx(m.total_btc, 0.005));
        assert!(approx(m.avg_cost_basis, 80_000.0));
        assert_eq!(m.transaction_count, 2);
        assert_eq!(m.first_purchase, Some(d(2025, 1, 1)));
        assert_eq!(m.last_purchase, Some(d(2025, 2, 1)));
    }

    #[test]
    fn metrics_empty() {
        let m = SnapshotService::new().compute_metrics(&[]);
        assert_eq!(m.avg_cost_basis, 0.0);
        assert_eq!(m.first_purchase, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart_service {
    use super::*;

    #[test]
    fn price_series_scales_by_ratio() {
        let svc = ChartService::new();
        let txs = vec![
            tx_rate(d(2025, 2, 1), 100.0, 0.001, 100_000.0),
            tx(d(2025, 1, 1), 100.0, 0.002),
        ];
        let points = svc.price_series(&txs, Timeframe::All, 0.5, d(2025, 3, 1));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, d(2025, 1, 1));
        assert!(approx(points[0].price, 25_000.0));
        assert!(approx(points[1].price, 50_000.0));
    }

    #[test]
    fn price_series_respects_timeframe() {
        let svc = ChartService::new();
        let txs = vec![
            tx(d(2024, 1, 1), 100.0, 0.002),
            tx(d(2025, 2, 20), 100.0, 0.001),
        ];
        let points = svc.price_series(&txs, Timeframe::OneMonth, 1.0, d(2025, 3, 1));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, d(2025, 2, 20));
    }

    #[test]
    fn cumulative_series_running_totals() {
        let svc = ChartService::new();
        let txs = vec![
            tx(d(2025, 2, 1), 300.0, 0.003),
            tx(d(2025, 1, 1), 100.0, 0.002),
        ];
        let points = svc.cumulative_series(&txs);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, d(2025, 1, 1));
        assert!(approx(points[0].invested, 100.0));
        assert!(approx(points[0].avg_cost, 50_000.0));
        assert!(approx(points[1].invested, 400.0));
        assert!(approx(points[1].btc, 0.005));
        assert!(approx(points[1].avg_cost, 80_000.0));
    }

    #[test]
    fn empty_series() {
        let svc = ChartService::new();
        assert!(svc.price_series(&[], Timeframe::All, 1.0, d(2025, 1, 1)).is_empty());
        assert!(svc.cumulative_series(&[]).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// CurrencyService
// ═══════════════════════════════════════════════════════════════════

mod currency_service {
    use super::*;

    #[test]
    fn normalize_code() {
        let svc = CurrencyService::new();
        assert_eq!(svc.normalize_code(" usd ").unwrap(), "USD");
        assert_eq!(svc.normalize_code("Eur").unwrap(), "EUR");
        assert!(svc.normalize_code("US").is_err());
        assert!(svc.normalize_code("US1").is_err());
        assert!(svc.normalize_code("EURO").is_err());
        assert!(svc.normalize_code("").is_err());
    }

    #[test]
    fn price_ratio() {
        let svc = CurrencyService::new();
        assert!(approx(svc.price_ratio(150_000.0, 100_000.0), 2.0 / 3.0));
        assert_eq!(svc.price_ratio(0.0, 100_000.0), 1.0);
        assert_eq!(svc.price_ratio(150_000.0, f64::NAN), 1.0);
    }

    #[test]
    fn ratio_from_quotes() {
        let svc = CurrencyService::new();
        let quotes: HashMap<String, f64> = [
            ("AUD".to_string(), 150_000.0),
            ("USD".to_string(), 100_000.0),
        ]
        .into_iter()
        .collect();
        assert!(approx(svc.ratio_from_quotes(&quotes, "aud", "usd"), 2.0 / 3.0));
        assert_eq!(svc.ratio_from_quotes(&quotes, "AUD", "AUD"), 1.0);
        assert_eq!(svc.ratio_from_quotes(&quotes, "AUD", "JPY"), 1.0);
    }

    #[test]
    fn convert() {
        let svc = CurrencyService::new();
        assert!(approx(svc.convert(300.0, 0.5), 150.0));
    }
}
