//! Typed description of the remote scheduler API.
//!
//! Each remote operation is a request struct implementing [`ApiEndpoint`],
//! so the HTTP client needs exactly one generic send path. Path
//! parameters (`{id}`) live on the struct but are skipped from the JSON
//! body via `#[serde(skip)]`.

use crate::{BookingSummary, Role, Room, TokenResponse, User};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata
/// for an API endpoint.
pub trait ApiEndpoint: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request must carry a bearer token.
    const REQUIRES_AUTH: bool;
    /// The URL path, relative to the API base URL.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiEndpoint for LoginRequest {
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl ApiEndpoint for RegisterRequest {
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

// =========================================================
// Rooms
// =========================================================

/// List all rooms (public).
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRoomsRequest;

impl ApiEndpoint for ListRoomsRequest {
    type Response = Vec<Room>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/rooms".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub capacity: i32,
}

impl ApiEndpoint for CreateRoomRequest {
    type Response = Room;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/rooms".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub capacity: i32,
}

impl ApiEndpoint for UpdateRoomRequest {
    type Response = Room;
    const METHOD: HttpMethod = HttpMethod::Put;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/rooms/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRoomRequest {
    pub id: i64,
}

impl ApiEndpoint for DeleteRoomRequest {
    // 204, no body. Success is ().
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/rooms/{}", self.id)
    }
}

// =========================================================
// Bookings
// =========================================================

/// List every booking (admin scope).
#[derive(Debug, Serialize, Deserialize)]
pub struct ListBookingsRequest;

impl ApiEndpoint for ListBookingsRequest {
    type Response = Vec<BookingSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/bookings".to_string()
    }
}

/// List the caller's own bookings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListMyBookingsRequest;

impl ApiEndpoint for ListMyBookingsRequest {
    type Response = Vec<BookingSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/bookings/my".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: i64,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

impl ApiEndpoint for CreateBookingRequest {
    type Response = BookingSummary;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/bookings".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub id: i64,
}

impl ApiEndpoint for CancelBookingRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/bookings/{}", self.id)
    }
}

// =========================================================
// Users (admin)
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiEndpoint for ListUsersRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/api/users".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub id: i64,
}

impl ApiEndpoint for DeleteUserRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetUserRoleRequest {
    #[serde(skip)]
    pub id: i64,
    pub role: Role,
}

impl ApiEndpoint for SetUserRoleRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/api/users/{}/role", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn paths_carry_ids() {
        assert_eq!(DeleteRoomRequest { id: 3 }.path(), "/rooms/3");
        assert_eq!(CancelBookingRequest { id: 12 }.path(), "/bookings/12");
        assert_eq!(
            SetUserRoleRequest { id: 5, role: Role::Admin }.path(),
            "/api/users/5/role"
        );
    }

    #[test]
    fn update_room_body_excludes_the_path_id() {
        let req = UpdateRoomRequest {
            id: 9,
            name: "Sala Beta".to_string(),
            capacity: 12,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "name": "Sala Beta", "capacity": 12 })
        );
    }

    #[test]
    fn create_booking_body_uses_camel_case() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let req = CreateBookingRequest {
            room_id: 2,
            start_at: start,
            end_at: start + chrono::Duration::hours(1),
        };
        let body = serde_json::to_string(&req).unwrap();
        assert!(body.contains("\"roomId\":2"));
        assert!(body.contains("\"startAt\":\"2025-01-10T10:00:00\""));
        assert!(body.contains("\"endAt\":\"2025-01-10T11:00:00\""));
    }

    #[test]
    fn only_write_methods_have_bodies() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(HttpMethod::Patch.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
