//! Provider descriptors for the three handshake endpoints.
//!
//! A descriptor is built from the provider's site base URL plus per-endpoint
//! paths, mirroring how providers document their handshake surface. Endpoints
//! must use HTTPS; plain HTTP is accepted only on loopback hosts, so locally
//! hosted providers stay reachable during development. Certificate trust is
//! configured on the transport instead.

// crates.io
use url::Host;
// self
use crate::{_prelude::*, request::HttpMethod};

/// Default request-token path used when no override is supplied.
pub const DEFAULT_REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
/// Default access-token path used when no override is supplied.
pub const DEFAULT_ACCESS_TOKEN_PATH: &str = "/oauth/access_token";
/// Default authorization-page path used when no override is supplied.
pub const DEFAULT_AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Site base URL could not be parsed.
	#[error("Site base URL could not be parsed: {url}.")]
	InvalidSite {
		/// Site value that failed to parse.
		url: String,
	},
	/// Endpoint path could not be joined onto the site base URL.
	#[error("The {endpoint} path could not be joined onto the site base URL: {path}.")]
	InvalidPath {
		/// Which endpoint failed to join.
		endpoint: &'static str,
		/// Path that failed to join.
		path: String,
	},
	/// Endpoints on non-loopback hosts must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Request-token endpoint issuing temporary credentials.
	pub request_token: Url,
	/// Access-token endpoint exchanging them for access credentials.
	pub access_token: Url,
	/// Authorization page presented to the resource owner; never fetched by
	/// the handshake itself.
	pub authorize: Url,
}

/// Immutable provider descriptor consumed by the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// HTTP method the provider expects at its token endpoints.
	pub http_method: HttpMethod,
}
impl ProviderDescriptor {
	/// Creates a builder seeded with the provider's site base URL.
	pub fn builder(site: impl Into<String>) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(site)
	}

	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("request_token", &self.endpoints.request_token)?;
		validate_endpoint("access_token", &self.endpoints.access_token)?;
		validate_endpoint("authorize", &self.endpoints.authorize)?;

		Ok(())
	}
}

/// Builder deriving the three endpoints from a site base URL.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Site base URL all endpoint paths are joined onto.
	pub site: String,
	/// Request-token path, defaulting to [`DEFAULT_REQUEST_TOKEN_PATH`].
	pub request_token_path: String,
	/// Access-token path, defaulting to [`DEFAULT_ACCESS_TOKEN_PATH`].
	pub access_token_path: String,
	/// Authorization-page path, defaulting to [`DEFAULT_AUTHORIZE_PATH`].
	pub authorize_path: String,
	/// HTTP method for the token endpoints, defaulting to POST.
	pub http_method: HttpMethod,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided site base URL.
	pub fn new(site: impl Into<String>) -> Self {
		Self {
			site: site.into(),
			request_token_path: DEFAULT_REQUEST_TOKEN_PATH.into(),
			access_token_path: DEFAULT_ACCESS_TOKEN_PATH.into(),
			authorize_path: DEFAULT_AUTHORIZE_PATH.into(),
			http_method: HttpMethod::default(),
		}
	}

	/// Overrides the request-token path.
	pub fn request_token_path(mut self, path: impl Into<String>) -> Self {
		self.request_token_path = path.into();

		self
	}

	/// Overrides the access-token path.
	pub fn access_token_path(mut self, path: impl Into<String>) -> Self {
		self.access_token_path = path.into();

		self
	}

	/// Overrides the authorization-page path.
	pub fn authorize_path(mut self, path: impl Into<String>) -> Self {
		self.authorize_path = path.into();

		self
	}

	/// Overrides the HTTP method used at the token endpoints.
	pub fn http_method(mut self, method: HttpMethod) -> Self {
		self.http_method = method;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let site = Url::parse(&self.site)
			.map_err(|_| ProviderDescriptorError::InvalidSite { url: self.site.clone() })?;
		let endpoints = ProviderEndpoints {
			request_token: join_endpoint(&site, "request_token", &self.request_token_path)?,
			access_token: join_endpoint(&site, "access_token", &self.access_token_path)?,
			authorize: join_endpoint(&site, "authorize", &self.authorize_path)?,
		};
		let descriptor = ProviderDescriptor { endpoints, http_method: self.http_method };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

fn join_endpoint(
	site: &Url,
	name: &'static str,
	path: &str,
) -> Result<Url, ProviderDescriptorError> {
	site.join(path).map_err(|_| ProviderDescriptorError::InvalidPath {
		endpoint: name,
		path: path.to_owned(),
	})
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() == "https" || (url.scheme() == "http" && is_loopback_host(url)) {
		Ok(())
	} else {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

// `localhost` plus the loopback address ranges; everything else goes through
// TLS.
fn is_loopback_host(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_applies_default_paths() {
		let descriptor = ProviderDescriptor::builder("https://127.0.0.1.nip.io:9090")
			.build()
			.expect("Descriptor should build successfully.");

		assert_eq!(
			descriptor.endpoints.request_token.as_str(),
			"https://127.0.0.1.nip.io:9090/oauth/request_token"
		);
		assert_eq!(
			descriptor.endpoints.access_token.as_str(),
			"https://127.0.0.1.nip.io:9090/oauth/access_token"
		);
		assert_eq!(
			descriptor.endpoints.authorize.as_str(),
			"https://127.0.0.1.nip.io:9090/oauth/authorize"
		);
		assert_eq!(descriptor.http_method, HttpMethod::Post);
	}

	#[test]
	fn builder_honors_path_and_method_overrides() {
		let descriptor = ProviderDescriptor::builder("https://provider.example")
			.request_token_path("/initiate")
			.access_token_path("/token")
			.authorize_path("/authorize_user")
			.http_method(HttpMethod::Get)
			.build()
			.expect("Descriptor should build successfully.");

		assert_eq!(
			descriptor.endpoints.request_token.as_str(),
			"https://provider.example/initiate"
		);
		assert_eq!(descriptor.endpoints.access_token.as_str(), "https://provider.example/token");
		assert_eq!(
			descriptor.endpoints.authorize.as_str(),
			"https://provider.example/authorize_user"
		);
		assert_eq!(descriptor.http_method, HttpMethod::Get);
	}

	#[test]
	fn builder_rejects_unparseable_site() {
		let err = ProviderDescriptor::builder("not a url")
			.build()
			.expect_err("Unparseable site should be rejected.");

		assert_eq!(err, ProviderDescriptorError::InvalidSite { url: "not a url".into() });
	}

	#[test]
	fn builder_rejects_insecure_site() {
		let err = ProviderDescriptor::builder("http://provider.example")
			.build()
			.expect_err("Insecure site should be rejected.");

		assert!(matches!(
			err,
			ProviderDescriptorError::InsecureEndpoint { endpoint: "request_token", .. }
		));
	}

	#[test]
	fn builder_accepts_loopback_http_site() {
		let ipv4 = ProviderDescriptor::builder("http://127.0.0.1:9090")
			.build()
			.expect("Loopback IPv4 site should build successfully.");
		let named = ProviderDescriptor::builder("http://localhost:9090")
			.build()
			.expect("Localhost site should build successfully.");

		assert_eq!(
			ipv4.endpoints.request_token.as_str(),
			"http://127.0.0.1:9090/oauth/request_token"
		);
		assert_eq!(named.endpoints.authorize.as_str(), "http://localhost:9090/oauth/authorize");
	}

	#[test]
	fn descriptor_serde_round_trips() {
		let descriptor = ProviderDescriptor::builder("https://provider.example")
			.build()
			.expect("Descriptor should build successfully.");
		let json =
			serde_json::to_string(&descriptor).expect("Descriptor should serialize successfully.");
		let back: ProviderDescriptor =
			serde_json::from_str(&json).expect("Descriptor should deserialize successfully.");

		assert_eq!(back, descriptor);
	}
}
