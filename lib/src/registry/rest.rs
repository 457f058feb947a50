use reqwest::{
    blocking::Client,
    header::{HeaderValue, ACCEPT},
    StatusCode,
};
use serde::Deserialize;

use crate::{asn::Asn, error::Error, prefix::Afi};

use super::Registry;

/// A [`Registry`] backed by the RIPE database REST API.
///
/// Route objects are found with an inverse search on the `origin` attribute, restricted to the
/// `route` or `route6` object class.
///
/// # Examples
///
/// ``` no_run
/// use ripe_routes::{Afi, Registry, RipeRest};
///
/// let mut ripe = RipeRest::new(RipeRest::DEFAULT_URL, RipeRest::DEFAULT_SOURCE)?;
/// ripe.lookup("AS3333".parse()?, Afi::Ipv4)?
///     .iter()
///     .for_each(|prefix| println!("{prefix}"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RipeRest {
    client: Client,
    base_url: String,
    source: String,
}

impl RipeRest {
    /// The public RIPE database REST API endpoint.
    pub const DEFAULT_URL: &'static str = "https://rest.db.ripe.net";

    /// The RIPE database source name.
    pub const DEFAULT_SOURCE: &'static str = "RIPE";

    /// Construct a new [`RipeRest`] client.
    ///
    /// # Errors
    ///
    /// An [`Error::Http`] is returned if the HTTP client cannot be initialised.
    pub fn new(base_url: &str, source: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            source: source.to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url)
    }
}

impl Registry for RipeRest {
    #[tracing::instrument(skip(self), fields(source = %self.source), level = "debug")]
    fn lookup(&mut self, asn: Asn, afi: Afi) -> Result<Vec<String>, Error> {
        let query_string = asn.to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("inverse-attribute", "origin"),
                ("type-filter", afi.route_class()),
                ("source", self.source.as_str()),
                ("query-string", query_string.as_str()),
            ])
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        tracing::debug!(%status, len = body.len(), "received search response");
        route_values(status, &body, afi.route_class())
    }
}

/// Extract the `class` attribute values from a search response.
fn route_values(status: StatusCode, body: &str, class: &str) -> Result<Vec<String>, Error> {
    match status {
        // the whois "no entries found" condition
        StatusCode::NOT_FOUND => {
            tracing::info!(class, "no matching objects found");
            Ok(Vec::new())
        }
        status if status.is_success() => {
            SearchResults::from_json(body).map(|results| results.attribute_values(class))
        }
        status => Err(Error::Status(status)),
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchResults {
    #[serde(default)]
    objects: Option<Objects>,
}

#[derive(Debug, Default, Deserialize)]
struct Objects {
    #[serde(default)]
    object: Vec<Object>,
}

#[derive(Debug, Deserialize)]
struct Object {
    attributes: Attributes,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(default)]
    attribute: Vec<Attribute>,
}

#[derive(Debug, Deserialize)]
struct Attribute {
    name: String,
    value: String,
}

impl SearchResults {
    fn from_json(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }

    fn attribute_values(self, name: &str) -> Vec<String> {
        self.objects
            .into_iter()
            .flat_map(|objects| objects.object)
            .flat_map(|object| object.attributes.attribute)
            .filter(|attr| attr.name == name)
            .map(|attr| attr.value)
            .collect()
    }
}
