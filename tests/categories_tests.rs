mod common;

use common::{TestApp, assert_flash, unique_username};

fn category_names(body: &serde_json::Value) -> Vec<String> {
    body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

fn category_id(body: &serde_json::Value, name: &str) -> i64 {
    body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("category {name} not found"))["id"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn test_registration_seeds_default_categories() {
    let app = TestApp::spawn().await;
    app.register_and_login(&unique_username("alice"), "secret1")
        .await;

    let body = app.categories().await;
    assert_eq!(
        category_names(&body),
        vec!["Family", "Friends", "General", "Work"]
    );

    // Each default carries its color
    let general = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "General")
        .unwrap();
    assert_eq!(general["color"], "#3B82F6");
}

#[tokio::test]
async fn test_add_category() {
    let app = TestApp::spawn().await;
    app.register_and_login(&unique_username("alice"), "secret1")
        .await;

    let response = app
        .client
        .post(app.url("/add_category"))
        .form(&[("name", "Clients"), ("color", "#123456")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/categories");
    assert_flash(&response, "Category added successfully");

    let body = app.categories().await;
    assert_eq!(
        category_names(&body),
        vec!["Clients", "Family", "Friends", "General", "Work"]
    );

    // The new label is immediately usable on contacts
    let response = app
        .add_contact(&[("name", "Big Co"), ("category", "Clients")])
        .await;
    assert_flash(&response, "Contact added successfully");
}

#[tokio::test]
async fn test_add_category_rejects_empty_name_and_duplicates() {
    let app = TestApp::spawn().await;
    app.register_and_login(&unique_username("alice"), "secret1")
        .await;

    let add = |name: &'static str| {
        app.client
            .post(app.url("/add_category"))
            .form(&[("name", name), ("color", "")])
            .send()
    };

    let response = add("   ").await.unwrap();
    assert_flash(&response, "Category name is required");

    // Duplicate of a seeded default
    let response = add("Work").await.unwrap();
    assert_flash(&response, "Category already exists");

    let body = app.categories().await;
    assert_eq!(body["categories"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_default_categories_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    app.register_and_login(&unique_username("alice"), "secret1")
        .await;

    let body = app.categories().await;
    let id = category_id(&body, "General");

    // Protected even with no contacts using it
    let response = app
        .client
        .get(app.url(&format!("/delete_category/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_flash(&response, "Cannot delete default categories");

    let body = app.categories().await;
    assert_eq!(body["categories"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_category_in_use_blocks_deletion_until_freed() {
    let app = TestApp::spawn().await;
    app.register_and_login(&unique_username("alice"), "secret1")
        .await;

    app.client
        .post(app.url("/add_category"))
        .form(&[("name", "Clients"), ("color", "#123456")])
        .send()
        .await
        .unwrap();
    app.add_contact(&[("name", "Big Co"), ("category", "Clients")])
        .await;

    let id = category_id(&app.categories().await, "Clients");
    let delete = || {
        app.client
            .get(app.url(&format!("/delete_category/{id}")))
            .send()
    };

    let response = delete().await.unwrap();
    assert_flash(&response, "Cannot delete category that is in use by contacts");

    // Free the category, then the delete goes through
    let contact_id = app.index("").await["contacts"][0]["id"].as_i64().unwrap();
    app.client
        .get(app.url(&format!("/delete/{contact_id}")))
        .send()
        .await
        .unwrap();

    let response = delete().await.unwrap();
    assert_flash(&response, "Category deleted successfully");

    let body = app.categories().await;
    assert!(!category_names(&body).contains(&"Clients".to_string()));
}

#[tokio::test]
async fn test_delete_unknown_category_is_not_found() {
    let app = TestApp::spawn().await;
    app.register_and_login(&unique_username("alice"), "secret1")
        .await;

    let response = app
        .client
        .get(app.url("/delete_category/999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_flash(&response, "Category not found");
}

#[tokio::test]
async fn test_categories_are_scoped_per_user() {
    let app = TestApp::spawn().await;

    let alice = TestApp::new_client();
    let bob = TestApp::new_client();
    app.register_and_login_with(&alice, &unique_username("alice"), "secret1")
        .await;
    app.register_and_login_with(&bob, &unique_username("bob"), "secret2")
        .await;

    alice
        .post(app.url("/add_category"))
        .form(&[("name", "Clients"), ("color", "#123456")])
        .send()
        .await
        .unwrap();

    // Bob does not see Alice's category and cannot use or delete it
    let body = app.categories_with(&bob).await;
    assert_eq!(
        category_names(&body),
        vec!["Family", "Friends", "General", "Work"]
    );

    let response = app
        .add_contact_with(&bob, &[("name", "Big Co"), ("category", "Clients")])
        .await;
    assert_flash(&response, "Unknown category: Clients");

    let id = category_id(&app.categories_with(&alice).await, "Clients");
    let response = bob
        .get(app.url(&format!("/delete_category/{id}")))
        .send()
        .await
        .unwrap();
    assert_flash(&response, "Category not found");

    // Alice's category is intact
    let body = app.categories_with(&alice).await;
    assert!(category_names(&body).contains(&"Clients".to_string()));
}
