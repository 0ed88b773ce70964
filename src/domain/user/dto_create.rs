use validator::Validate;

use super::UserRole;

#[derive(Debug, Clone, Validate)]
pub struct CreateUserDto {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "full name is required"))]
    pub full_name: String,
    pub role: Option<UserRole>,
}
