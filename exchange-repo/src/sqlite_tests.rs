//! SQLite repository tests against an in-memory database.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use exchange_types::{
    ConversionRepository, CryptoCurrency, HistoryFilter, NewConversion, PageQuery, SortOrder,
};

use crate::SqliteConversionRepo;

async fn repo() -> SqliteConversionRepo {
    SqliteConversionRepo::new("sqlite::memory:").await.unwrap()
}

async fn seed(
    repo: &SqliteConversionRepo,
    from: CryptoCurrency,
    to: CryptoCurrency,
    amount: Decimal,
    converted: Decimal,
) -> exchange_types::ConversionRecord {
    repo.save(NewConversion::new(from, to, amount, converted))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_save_assigns_id_timestamp_and_transaction_id() {
    let repo = repo().await;

    let saved = seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1.5), dec!(30)).await;

    assert!(Uuid::parse_str(&saved.transaction_id).is_ok());
    assert_ne!(saved.transaction_id, saved.id.to_string());
    assert_eq!(saved.amount, dec!(1.5));
    assert_eq!(saved.converted_amount, dec!(30));
}

#[tokio::test]
async fn test_save_preserves_provided_transaction_id() {
    let repo = repo().await;

    let record = NewConversion::new(
        CryptoCurrency::BTC,
        CryptoCurrency::ETH,
        dec!(1),
        dec!(20),
    )
    .with_transaction_id("my-tx-id".to_string());

    let saved = repo.save(record).await.unwrap();
    assert_eq!(saved.transaction_id, "my-tx-id");
}

#[tokio::test]
async fn test_save_round_trips_high_precision_decimals() {
    let repo = repo().await;

    let amount = dec!(100);
    let converted = dec!(2711598539.488985400);
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ARB, amount, converted).await;

    let (content, total) = repo.search(None, &PageQuery::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(content[0].converted_amount, converted);
}

#[tokio::test]
async fn test_search_without_filter_matches_all() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(20)).await;
    seed(&repo, CryptoCurrency::SOL, CryptoCurrency::ADA, dec!(2), dec!(40)).await;

    let (content, total) = repo.search(None, &PageQuery::default()).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(content.len(), 2);
}

#[tokio::test]
async fn test_search_filters_by_symbols() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(20)).await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ARB, dec!(2), dec!(40)).await;
    seed(&repo, CryptoCurrency::SOL, CryptoCurrency::ARB, dec!(3), dec!(60)).await;

    let filter = HistoryFilter {
        from: Some(CryptoCurrency::BTC),
        to: Some(CryptoCurrency::ARB),
        ..Default::default()
    };

    let (content, total) = repo
        .search(Some(&filter), &PageQuery::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(content[0].from_currency, CryptoCurrency::BTC);
    assert_eq!(content[0].to_currency, CryptoCurrency::ARB);
}

#[tokio::test]
async fn test_search_amount_range_is_inclusive() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(10), dec!(1)).await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(50), dec!(2)).await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(90), dec!(3)).await;

    let filter = HistoryFilter {
        min_amount: Some(dec!(50)),
        max_amount: Some(dec!(90)),
        ..Default::default()
    };

    let (content, total) = repo
        .search(Some(&filter), &PageQuery::default())
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert!(content.iter().all(|r| r.amount >= dec!(50)));
}

#[tokio::test]
async fn test_search_converted_amount_range() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(100)).await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(2), dec!(200)).await;

    let filter = HistoryFilter {
        min_converted_amount: Some(dec!(150)),
        ..Default::default()
    };

    let (content, total) = repo
        .search(Some(&filter), &PageQuery::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(content[0].converted_amount, dec!(200));
}

#[tokio::test]
async fn test_converted_amount_bounds_stay_exact_past_f64_precision() {
    let repo = repo().await;
    let stored = dec!(2711598539.488985400);
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ARB, dec!(100), stored).await;

    // The two bounds below collapse to the same f64; the predicates must
    // still tell them apart.
    let at_value = HistoryFilter {
        min_converted_amount: Some(stored),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&at_value), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 1);

    let just_above = HistoryFilter {
        min_converted_amount: Some(dec!(2711598539.488985401)),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&just_above), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_search_created_at_range() {
    let repo = repo().await;
    let first = seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(20)).await;

    let filter_before = HistoryFilter {
        created_at_to: Some(first.created_at - chrono::Duration::hours(1)),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&filter_before), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 0);

    let filter_around = HistoryFilter {
        created_at_from: Some(first.created_at - chrono::Duration::hours(1)),
        created_at_to: Some(first.created_at + chrono::Duration::hours(1)),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&filter_around), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_transaction_id_substring_is_case_insensitive() {
    let repo = repo().await;
    let record = NewConversion::new(
        CryptoCurrency::BTC,
        CryptoCurrency::ARB,
        dec!(1),
        dec!(20),
    )
    .with_transaction_id("6c7de41f-71e5-4d63-984d-8dcb60ba6265".to_string());
    repo.save(record).await.unwrap();

    let matching = HistoryFilter {
        transaction_id_contains: Some("6C7DE4".to_string()),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&matching), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 1);

    let non_matching = HistoryFilter {
        transaction_id_contains: Some("zzzz".to_string()),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&non_matching), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_transaction_id_token_is_matched_literally() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(20)).await;

    // "%" would match everything if it were interpreted as a wildcard.
    let filter = HistoryFilter {
        transaction_id_contains: Some("%".to_string()),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&filter), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_blank_transaction_id_token_imposes_no_predicate() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(20)).await;

    let filter = HistoryFilter {
        transaction_id_contains: Some("   ".to_string()),
        ..Default::default()
    };
    let (_, total) = repo
        .search(Some(&filter), &PageQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_pagination_reports_exact_totals() {
    let repo = repo().await;
    for i in 1..=5 {
        seed(
            &repo,
            CryptoCurrency::BTC,
            CryptoCurrency::ETH,
            Decimal::from(i),
            Decimal::from(i * 20),
        )
        .await;
    }

    let page = PageQuery::new(2, 2).with_sort(SortOrder::asc("amount"));
    let (content, total) = repo.search(None, &page).await.unwrap();

    assert_eq!(total, 5);
    assert_eq!(content.len(), 2);
    assert_eq!(content[0].amount, dec!(3));
    assert_eq!(content[1].amount, dec!(4));
}

#[tokio::test]
async fn test_sort_by_amount_descending() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(5), dec!(1)).await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(2)).await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(3), dec!(3)).await;

    let page = PageQuery::new(1, 10).with_sort(SortOrder::desc("amount"));
    let (content, _) = repo.search(None, &page).await.unwrap();

    let amounts: Vec<Decimal> = content.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![dec!(5), dec!(3), dec!(1)]);
}

#[tokio::test]
async fn test_unknown_sort_property_falls_back_to_created_at() {
    let repo = repo().await;
    seed(&repo, CryptoCurrency::BTC, CryptoCurrency::ETH, dec!(1), dec!(20)).await;

    let page = PageQuery::new(1, 10).with_sort(SortOrder::asc("nonsense"));
    let (content, _) = repo.search(None, &page).await.unwrap();
    assert_eq!(content.len(), 1);
}
