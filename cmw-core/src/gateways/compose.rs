use cmw_entities::email::ComposeRequest;

/// Hands a prepared email over to an external mail client.
///
/// Delivery is neither performed nor confirmed.
pub trait ComposeGateway {
    fn compose(&self, request: &ComposeRequest);
}
