use aerodesk_booking::{BookingLedger, BookingWorkflow, CollectionDirectory, FareCalculator, Step};
use aerodesk_core::{Booking, Flight, ListingEnricher, PaymentMethod};
use aerodesk_store::{JsonFileCollection, MemoryCollection};
use std::sync::Arc;

fn aa100() -> Flight {
    Flight {
        id: 1,
        flight_number: "AA100".to_string(),
        departure: "New York".to_string(),
        arrival: "Los Angeles".to_string(),
        date: "2025-07-01".to_string(),
        time: "10:00".to_string(),
        airline: "American Airlines".to_string(),
        price: None,
        seats: None,
        duration: None,
    }
}

#[tokio::test]
async fn test_book_aa100_then_book_another() {
    let dir = tempfile::tempdir().unwrap();
    let slot = dir.path().join("my_bookings.json");

    let directory = CollectionDirectory::new(Arc::new(MemoryCollection::with_records(vec![aa100()])));
    let ledger = BookingLedger::new(Arc::new(JsonFileCollection::<Booking>::new(&slot)));
    let mut wf = BookingWorkflow::with_enricher(ledger, FareCalculator::default(), ListingEnricher::seeded(9));

    assert_eq!(wf.load(&directory).await, 1);
    wf.select_flight("AA100").unwrap();
    wf.proceed_to_payment().unwrap();
    wf.choose_payment_method("credit".parse::<PaymentMethod>().unwrap()).unwrap();
    wf.enter_payment_details("1234", "5000").unwrap();

    let base = wf.selected().unwrap().price;
    let booking = wf.confirm().await.unwrap().clone();
    assert_eq!(booking.flight_number(), "AA100");
    assert_eq!(booking.payment_method, PaymentMethod::CreditCard);
    assert!((booking.total - (base * 1.18 + 15.0)).abs() < 1e-9);

    // The slot holds exactly the one booking, readable as plain JSON.
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&slot).unwrap()).unwrap();
    let stored = raw.as_array().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["flightNumber"], "AA100");
    assert_eq!(stored[0]["accountNumber"], "1234");
    // Synthesized display price is not part of the flight snapshot.
    assert!(stored[0].get("price").is_none());

    // "Book Another Flight"
    wf.reset();
    assert_eq!(wf.step(), Step::SelectingFlight);
    assert_eq!(wf.passengers(), 1);
    assert!(wf.selected().is_none());
    assert!(wf.payment_method().is_none());
}

#[tokio::test]
async fn test_history_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let slot = dir.path().join("my_bookings.json");
    let directory = CollectionDirectory::new(Arc::new(MemoryCollection::with_records(vec![aa100()])));

    for account in ["1111", "2222"] {
        let ledger = BookingLedger::new(Arc::new(JsonFileCollection::<Booking>::new(&slot)));
        let mut wf = BookingWorkflow::new(ledger, FareCalculator::default());
        wf.load(&directory).await;
        wf.select_flight("AA100").unwrap();
        wf.set_passengers(2).unwrap();
        wf.proceed_to_payment().unwrap();
        wf.choose_payment_method(PaymentMethod::PayPal).unwrap();
        wf.enter_payment_details(account, "99").unwrap();
        wf.confirm().await.unwrap();
    }

    let ledger = BookingLedger::new(Arc::new(JsonFileCollection::<Booking>::new(&slot)));
    let history = ledger.list().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].account_number.expose(), "1111");
    assert_eq!(history[1].passengers, 2);

    ledger.remove_at(0).await.unwrap();
    assert_eq!(ledger.list().await.unwrap()[0].account_number.expose(), "2222");
}
