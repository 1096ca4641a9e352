use crate::controllers::interactive::data::render_request::RenderRequest;

/// Where the interaction controller sends render triggers. Implementations
/// must return promptly; completion is reported out of band.
pub trait RenderPort {
    fn render(&mut self, request: RenderRequest);
}
