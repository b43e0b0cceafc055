use anyhow::{Context, Result, ensure};
use crux_http::{
    HttpError,
    protocol::{HttpRequest, HttpResponse, HttpResult},
};
use log::{debug, warn};
use reqwest::{Client, Method, Url};
use sfs_bridge_ui_core::BASE_URL;

/// Executes the core's HTTP requests against the bridge
///
/// The core addresses every endpoint below the dummy [`BASE_URL`]; this
/// client swaps that prefix for the configured device address.
#[derive(Clone, Debug)]
pub struct DeviceClient {
    client: Client,
    base: Url,
}

impl DeviceClient {
    pub fn new(base: Url) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client, base })
    }

    /// Map a core URL onto the device
    ///
    /// ```
    /// use sfs_bridge_ui::http_client::DeviceClient;
    ///
    /// let client = DeviceClient::new("http://192.168.4.1".parse().unwrap()).unwrap();
    /// let url = client.device_url("https://relative/sensor_status").unwrap();
    /// assert_eq!(url.as_str(), "http://192.168.4.1/sensor_status");
    /// ```
    pub fn device_url(&self, core_url: &str) -> Result<Url> {
        let path = core_url.strip_prefix(BASE_URL).unwrap_or_default();

        ensure!(
            path.starts_with('/'),
            "failed to map {core_url}: expected a path below {BASE_URL}"
        );

        self.base
            .join(path)
            .with_context(|| format!("failed to join {path} onto {}", self.base))
    }

    /// Perform a request, transport failures become `HttpError::Io`
    ///
    /// Non-2xx statuses are passed through untouched, the core decides what
    /// they mean.
    pub async fn execute(&self, request: &HttpRequest) -> HttpResult {
        match self.send(request).await {
            Ok(response) => HttpResult::Ok(response),
            Err(e) => {
                warn!("{} {} failed: {e:#}", request.method, request.url);
                HttpResult::Err(HttpError::Io(format!("{e:#}")))
            }
        }
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = self.device_url(&request.url)?;
        let method = Method::from_bytes(request.method.as_bytes())
            .with_context(|| format!("failed to parse method {}", request.method))?;

        debug!("{method} {url}");

        let mut builder = self.client.request(method, url.clone());
        for header in &request.headers {
            builder = builder.header(&header.name, &header.value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let res = builder
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;

        let mut response = HttpResponse::status(res.status().as_u16());
        for (name, value) in res.headers() {
            if let Ok(value) = value.to_str() {
                response.header(name.as_str(), value);
            }
        }

        let body = res
            .bytes()
            .await
            .context("failed to read response body")?;

        Ok(response.body(body.to_vec()).build())
    }
}
