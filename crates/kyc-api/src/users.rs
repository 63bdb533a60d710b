//! Handler for `GET /users/by-email`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{OriginalUri, Query, State, rejection::QueryRejection},
};
use kyc_core::UserProfile;
use serde::Deserialize;

use crate::{
  directory::ProfileDirectory,
  error::{Error, ErrorResponse},
};

#[derive(Debug, Deserialize, Default)]
pub struct ByEmailParams {
  pub email: Option<String>,
}

/// `GET /users/by-email?email=<address>`
pub async fn by_email<D>(
  State(directory): State<Arc<D>>,
  OriginalUri(uri): OriginalUri,
  params: Result<Query<ByEmailParams>, QueryRejection>,
) -> Result<Json<UserProfile>, ErrorResponse>
where
  D: ProfileDirectory,
{
  let path = uri.path();
  // A query that does not decode (e.g. `email` given twice) cannot be a
  // single well-formed address.
  let Query(params) = params.map_err(|rejection| {
    tracing::debug!(%rejection, "rejected query string");
    Error::BadRequest(MALFORMED_EMAIL.into()).at(path)
  })?;
  let email = params.email.unwrap_or_default();
  validate_email(&email).map_err(|e| e.at(path))?;

  let record = directory
    .find_by_email(&email)
    .await
    .map_err(|e| Error::Directory(Box::new(e)).at(path))?
    .ok_or_else(|| Error::NotFound(format!("User not found: {email}")).at(path))?;

  tracing::debug!(%email, "profile found");
  Ok(Json(record.to_profile()))
}

const MALFORMED_EMAIL: &str = "email: must be a well-formed email address";

fn validate_email(email: &str) -> Result<(), Error> {
  if email.trim().is_empty() {
    return Err(Error::BadRequest("email: must not be blank".into()));
  }
  if !is_well_formed(email) {
    return Err(Error::BadRequest(MALFORMED_EMAIL.into()));
  }
  Ok(())
}

/// `local@domain`, one `@`, no whitespace, domain labels non-empty.
fn is_well_formed(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.is_empty()
    && !domain.contains('@')
    && domain.split('.').all(|label| !label.is_empty())
}
