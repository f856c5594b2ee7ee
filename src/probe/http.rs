use reqwest::blocking::Client;

use super::{HttpReply, ProbeError, ProbeOptions};

/// The `http_post` capability: send a form and hand back status + body.
pub trait PostForm {
    fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<HttpReply, ProbeError>;
}

/// Blocking `reqwest` client with the probe timeout applied to every request.
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(options: &ProbeOptions) -> Result<Self, ProbeError> {
        let inner = Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(ProbeError::client_init)?;
        Ok(Self { inner })
    }
}

impl PostForm for HttpClient {
    fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<HttpReply, ProbeError> {
        let mut request = self.inner.post(url).form(form);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().map_err(ProbeError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(ProbeError::transport)?;
        Ok(HttpReply { status, body })
    }
}
