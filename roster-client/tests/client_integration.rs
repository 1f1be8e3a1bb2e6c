//! End-to-end client tests
//!
//! Spins up a real roster-server on a random loopback port and drives it
//! through the typed client.

use roster_client::{ClientConfig, ClientError, EmployeeInput, HttpClient};
use roster_server::services::http::build_router;
use roster_server::{Config, ServerState};

async fn spawn_server() -> (tempfile::TempDir, HttpClient) {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize state");
    let app = build_router(state);

    let handle: axum_server::Handle<std::net::SocketAddr> = axum_server::Handle::new();
    let server_handle = handle.clone();
    tokio::spawn(async move {
        axum_server::bind("127.0.0.1:0".parse().unwrap())
            .handle(server_handle)
            .serve(app.into_make_service())
            .await
            .expect("server run");
    });

    // Wait for the listener before handing out the base URL
    let addr = handle.listening().await.expect("server bound");
    let client = ClientConfig::new(format!("http://{addr}"))
        .with_timeout(5)
        .build_http_client();
    (dir, client)
}

fn input(name: &str, email: &str) -> EmployeeInput {
    EmployeeInput {
        name: name.to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        department: "Engineering".to_string(),
        salary: 64000.0,
    }
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([64, 128, 192]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

#[tokio::test]
async fn test_client_crud_roundtrip() {
    let (_dir, client) = spawn_server().await;

    let created = client
        .create_employee(&input("Alice", "alice@example.com"))
        .await
        .expect("create");
    assert_eq!(created.name, "Alice");
    assert!(created.id > 0);
    assert!(created.profile_image.is_none());

    let fetched = client.get_employee(created.id).await.expect("get");
    assert_eq!(fetched.email, "alice@example.com");
    assert_eq!(fetched.created_at, created.created_at);

    let list = client.list_employees(None, None, None).await.expect("list");
    assert_eq!(list.pagination.total_employees, 1);
    assert_eq!(list.employees[0].id, created.id);

    let mut changed = input("Alice Cooper", "alice@example.com");
    changed.salary = 91000.0;
    let updated = client
        .update_employee(created.id, &changed)
        .await
        .expect("update");
    assert_eq!(updated.name, "Alice Cooper");
    assert_eq!(updated.salary, 91000.0);
    assert_eq!(updated.created_at, created.created_at);

    client.delete_employee(created.id).await.expect("delete");
    let err = client.get_employee(created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(msg) if msg == "Employee not found"));
}

#[tokio::test]
async fn test_client_search_and_paging() {
    let (_dir, client) = spawn_server().await;

    for i in 0..7 {
        client
            .create_employee(&input(&format!("Worker {i}"), &format!("w{i}@example.com")))
            .await
            .expect("create");
    }
    client
        .create_employee(&input("Alice", "alice@example.com"))
        .await
        .expect("create");

    let page = client
        .list_employees(None, Some(2), Some(5))
        .await
        .expect("list page 2");
    assert_eq!(page.pagination.total_employees, 8);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.employees.len(), 3);

    let found = client
        .list_employees(Some("alice"), None, None)
        .await
        .expect("search");
    assert_eq!(found.pagination.total_employees, 1);
    assert_eq!(found.employees[0].name, "Alice");
}

#[tokio::test]
async fn test_client_error_mapping() {
    let (_dir, client) = spawn_server().await;

    let err = client.get_employee(424242).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    client
        .create_employee(&input("Alice", "alice@example.com"))
        .await
        .expect("create");
    let err = client
        .create_employee(&input("Alison", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(msg) if msg == "Employee with this email already exists"));

    // A zero salary falls into the required-fields rule
    let mut bad = input("Bob", "bob@example.com");
    bad.salary = 0.0;
    let err = client.create_employee(&bad).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(msg) if msg == "All fields are required"));
}

#[tokio::test]
async fn test_client_image_upload() {
    let (_dir, client) = spawn_server().await;

    let created = client
        .create_employee_with_image(&input("Alice", "alice@example.com"), "avatar.png", png_bytes())
        .await
        .expect("create with image");
    let path = created.profile_image.clone().expect("image path");
    assert!(path.ends_with(".jpg"));

    let bytes = client.fetch_image(&path).await.expect("fetch image");
    assert!(!bytes.is_empty());

    // Text-only update keeps the stored image
    let updated = client
        .update_employee(created.id, &input("Alice B", "alice@example.com"))
        .await
        .expect("update");
    assert_eq!(updated.profile_image.as_deref(), Some(path.as_str()));

    // Replacing the image through update works too
    let replaced = client
        .update_employee_with_image(
            created.id,
            &input("Alice B", "alice@example.com"),
            "next.png",
            {
                let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
                let mut buf = std::io::Cursor::new(Vec::new());
                image::DynamicImage::ImageRgb8(img)
                    .write_to(&mut buf, image::ImageFormat::Png)
                    .expect("encode png");
                buf.into_inner()
            },
        )
        .await
        .expect("update with image");
    let new_path = replaced.profile_image.expect("image path");
    assert_ne!(new_path, path);
}
