//! Query-layer tests.

mod common;

use common::*;

fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}

// ============ Users ============

#[test]
fn test_create_and_get_user() {
    let pool = test_pool();
    let conn = pool.get().unwrap();

    let user = create_test_user(&conn, "Rita", UserType::Realtor);
    let fetched = queries::get_user_by_id(&conn, user.id).unwrap().unwrap();
    assert_eq!(fetched.name, "Rita");
    assert_eq!(fetched.user_type, UserType::Realtor);

    let by_email = queries::get_user_by_email(&conn, &user.email).unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    assert!(queries::get_user_by_id(&conn, 999).unwrap().is_none());
}

#[test]
fn test_duplicate_email_is_rejected() {
    let pool = test_pool();
    let conn = pool.get().unwrap();

    create_test_user(&conn, "Rita", UserType::Realtor);
    let dup = CreateUser {
        name: "Rita Again".into(),
        email: "rita@example.com".into(),
        phone: "555-0199".into(),
        user_type: UserType::Buyer,
    };
    assert!(queries::create_user(&conn, &dup).is_err());
}

// ============ Homes ============

#[test]
fn test_create_home_with_images() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);

    let home = create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &["a.jpg", "b.jpg"]);
    assert_eq!(home.realtor_id, realtor.id);

    let images = queries::list_images_for_home(&conn, home.id).unwrap();
    let urls: Vec<&str> = images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, vec!["a.jpg", "b.jpg"]);
}

#[test]
fn test_create_home_rolls_back_when_an_image_fails() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);

    // Second image violates the url constraint.
    let input = home_input("Toronto", 400000.0, &["a.jpg", ""]);
    let result = queries::create_home(&mut conn, &input, realtor.id);

    assert!(result.is_err());
    assert_eq!(count(&conn, "homes"), 0);
    assert_eq!(count(&conn, "images"), 0);
}

#[test]
fn test_create_home_for_unknown_realtor_fails() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();

    let input = home_input("Toronto", 400000.0, &["a.jpg"]);
    assert!(queries::create_home(&mut conn, &input, 42).is_err());
    assert_eq!(count(&conn, "homes"), 0);
}

#[test]
fn test_list_homes_summary_uses_first_image() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);
    create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &["first.jpg", "second.jpg"]);
    create_test_home(&mut conn, realtor.id, "Ottawa", 300000.0, &[]);

    let homes = queries::list_homes(&conn, &HomeFilters::default()).unwrap();
    assert_eq!(homes.len(), 2);
    assert_eq!(homes[0].image.as_deref(), Some("first.jpg"));
    assert_eq!(homes[1].image, None);
}

#[test]
fn test_list_homes_filters_combine() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);
    create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &[]);
    create_test_home(&mut conn, realtor.id, "Toronto", 800000.0, &[]);
    create_test_home(&mut conn, realtor.id, "Ottawa", 500000.0, &[]);

    let filters = HomeFilters {
        city: Some("Toronto".into()),
        min_price: Some(500000.0),
        ..Default::default()
    };
    let homes = queries::list_homes(&conn, &filters).unwrap();
    assert_eq!(homes.len(), 1);
    assert_eq!(homes[0].price, 800000.0);

    let filters = HomeFilters {
        property_type: Some(PropertyType::Condo),
        ..Default::default()
    };
    assert!(queries::list_homes(&conn, &filters).unwrap().is_empty());

    // Bounds are inclusive.
    let filters = HomeFilters {
        min_price: Some(400000.0),
        max_price: Some(500000.0),
        ..Default::default()
    };
    assert_eq!(queries::list_homes(&conn, &filters).unwrap().len(), 2);
}

#[test]
fn test_update_home_partial() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);
    let home = create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &[]);

    let update = UpdateHome {
        city: Some("Ottawa".into()),
        property_type: Some(PropertyType::Condo),
        ..Default::default()
    };
    assert!(queries::update_home(&conn, home.id, &update).unwrap());

    let stored = queries::get_home_by_id(&conn, home.id).unwrap().unwrap();
    assert_eq!(stored.city, "Ottawa");
    assert_eq!(stored.property_type, PropertyType::Condo);
    assert_eq!(stored.price, home.price);
    assert_eq!(stored.address, home.address);
    assert_eq!(stored.number_of_bedrooms, home.number_of_bedrooms);

    assert!(!queries::update_home(&conn, 999, &update).unwrap());
    assert!(!queries::update_home(&conn, home.id, &UpdateHome::default()).unwrap());
}

#[test]
fn test_delete_home_cascades() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);
    let buyer = create_test_user(&conn, "Bea", UserType::Buyer);
    let home = create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &["a.jpg"]);
    queries::create_message(&conn, home.id, realtor.id, buyer.id, "Hi").unwrap();

    assert!(queries::delete_home(&conn, home.id).unwrap());
    assert_eq!(count(&conn, "images"), 0);
    assert_eq!(count(&conn, "messages"), 0);
    assert!(!queries::delete_home(&conn, home.id).unwrap());
}

#[test]
fn test_get_realtor_by_home_id() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);
    let home = create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &[]);

    let owner = queries::get_realtor_by_home_id(&conn, home.id).unwrap().unwrap();
    assert_eq!(
        owner,
        Realtor {
            id: realtor.id,
            name: "Rita".into(),
            email: "rita@example.com".into(),
            phone: "555-0100".into(),
        }
    );

    assert!(queries::get_realtor_by_home_id(&conn, 999).unwrap().is_none());
}

// ============ Messages ============

#[test]
fn test_messages_listed_in_insert_order() {
    let pool = test_pool();
    let mut conn = pool.get().unwrap();
    let realtor = create_test_user(&conn, "Rita", UserType::Realtor);
    let buyer = create_test_user(&conn, "Bea", UserType::Buyer);
    let home = create_test_home(&mut conn, realtor.id, "Toronto", 400000.0, &[]);
    let other = create_test_home(&mut conn, realtor.id, "Ottawa", 300000.0, &[]);

    queries::create_message(&conn, home.id, realtor.id, buyer.id, "one").unwrap();
    queries::create_message(&conn, other.id, realtor.id, buyer.id, "elsewhere").unwrap();
    queries::create_message(&conn, home.id, realtor.id, buyer.id, "two").unwrap();

    let messages = queries::list_messages_for_home(&conn, home.id).unwrap();
    let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["one", "two"]);
    assert!(messages.iter().all(|m| m.buyer_id == buyer.id));
}

// ============ Pool ============

#[test]
fn test_file_pool_shares_data_and_schema_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("realty.db");
    let pool = realty::db::create_pool(path.to_str().unwrap()).unwrap();

    let user = {
        let conn = pool.get().unwrap();
        realty::db::init_db(&conn).unwrap();
        realty::db::init_db(&conn).unwrap();
        create_test_user(&conn, "Rita", UserType::Realtor)
    };

    let a = pool.get().unwrap();
    let b = pool.get().unwrap();
    assert!(queries::get_user_by_id(&a, user.id).unwrap().is_some());
    assert!(queries::get_user_by_id(&b, user.id).unwrap().is_some());

    let foreign_keys: i64 = b
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}
