use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::wire::{Listing, WireBooking, WireBuilding, WireError};
use crate::config::ApiConfig;
use crate::session::SessionContext;
use crate::workflows::booking::{
    Booking, BookingDirectory, BookingRequest, BookingScope, Building, FetchError, OwnerId,
    RemoteCall,
};
use crate::workflows::buildings::{BuildingRegistration, RegistrationReply};
use crate::workflows::inspection::{
    GatewayError, InspectionGateway, InspectionPayload, IMAGE_FIELD,
};

/// Error raised by the HTTP client before it is mapped onto a workflow error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Wire(#[from] WireError),
}

type ApiResult<T> = Result<T, ApiError>;

/// Client for the remote fire-safety REST API, bound to one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionContext) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_http(http, &config.base_url, session)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
        session: SessionContext,
    ) -> ApiResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|err| ApiError::BaseUrl {
            value: base_url.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::BaseUrl {
                value: format!("{}{}", self.base_url, path),
                reason: err.to_string(),
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => request.header(AUTHORIZATION, bearer),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self
            .authorize(self.http.get(url).query(query))
            .send()
            .await?;
        let body = read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<String> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let response = self.authorize(self.http.post(url).json(body)).send().await?;
        read_success(response).await
    }

    pub async fn fetch_buildings(&self, owner: Option<OwnerId>) -> ApiResult<Vec<Building>> {
        let query = match owner {
            Some(owner) => vec![("user_id", owner.0.to_string())],
            None => Vec::new(),
        };
        let listing: Listing<WireBuilding> = self.get_json("buildings", &query).await?;
        listing
            .into_items()
            .into_iter()
            .map(|wire| Building::try_from(wire).map_err(ApiError::from))
            .collect()
    }

    pub async fn fetch_bookings(&self, scope: BookingScope) -> ApiResult<Vec<Booking>> {
        let listing: Listing<WireBooking> = match scope {
            BookingScope::User(user_id) => {
                self.get_json("my-booking", &[("user_id", user_id.to_string())])
                    .await?
            }
            BookingScope::All => self.get_json("bookings", &[]).await?,
        };
        listing
            .into_items()
            .into_iter()
            .map(|wire| Booking::try_from(wire).map_err(ApiError::from))
            .collect()
    }

    pub async fn post_booking(&self, request: &BookingRequest) -> ApiResult<()> {
        self.post_json("bookings", request).await.map(|_| ())
    }

    pub async fn post_registration(
        &self,
        registration: &BuildingRegistration,
    ) -> ApiResult<RegistrationReply> {
        let body = self.post_json("buildings/register", registration).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn multipart_form(payload: &InspectionPayload) -> Result<Form, GatewayError> {
        let mut form = Form::new();
        for (name, value) in payload.fields() {
            form = form.text(*name, value.clone());
        }

        for image in payload.images() {
            let path = image
                .handle
                .strip_prefix("file://")
                .unwrap_or(&image.handle);
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| GatewayError::Image {
                    handle: image.handle.clone(),
                    source,
                })?;
            let part = Part::bytes(bytes)
                .file_name(image.file_name.clone())
                .mime_str(image.mime.as_ref())
                .map_err(|err| GatewayError::Transport(err.to_string()))?;
            form = form.part(IMAGE_FIELD, part);
        }

        Ok(form)
    }
}

async fn read_success(response: reqwest::Response) -> ApiResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        warn!(%status, "remote request failed");
        Err(ApiError::Status { status, body })
    }
}

#[async_trait]
impl BookingDirectory for ApiClient {
    async fn buildings(&self, owner: Option<OwnerId>) -> Result<Vec<Building>, FetchError> {
        self.fetch_buildings(owner)
            .await
            .map_err(|err| FetchError::new("buildings", err))
    }

    async fn bookings(&self, scope: BookingScope) -> Result<Vec<Booking>, FetchError> {
        self.fetch_bookings(scope)
            .await
            .map_err(|err| FetchError::new("bookings", err))
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<(), FetchError> {
        self.post_booking(request)
            .await
            .map_err(|err| FetchError::during(RemoteCall::CreateBooking, err))
    }

    async fn register_building(
        &self,
        registration: &BuildingRegistration,
    ) -> Result<RegistrationReply, FetchError> {
        self.post_registration(registration)
            .await
            .map_err(|err| FetchError::during(RemoteCall::RegisterBuilding, err))
    }
}

#[async_trait]
impl InspectionGateway for ApiClient {
    async fn submit_inspection(&self, payload: &InspectionPayload) -> Result<u16, GatewayError> {
        let form = Self::multipart_form(payload).await?;
        let url = self
            .endpoint("save-inpection")
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        debug!(%url, booking = %payload.booking_id, "POST multipart");

        let response = self
            .authorize(self.http.post(url).multipart(form))
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(response.status().as_u16())
    }
}
