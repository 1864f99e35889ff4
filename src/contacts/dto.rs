use serde::{Deserialize, Serialize};

use super::repo_types::Contact;

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ContactBody {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub msg: &'static str,
    pub contact: ContactBody,
}

#[derive(Debug, Serialize)]
pub struct ContactListItem {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

impl From<Contact> for ContactListItem {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactListItem>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}
