use pixel_quant::{PipelineError, PipelineOutput, PixelBuffer, Pixelator};

/// Holds the currently displayed pipeline result.
///
/// A run either fully succeeds and replaces the result, or fails and
/// leaves the previous one in place. There is no partial state.
#[derive(Debug, Default)]
pub struct PixelationService {
    current: Option<PipelineOutput>,
}

impl PixelationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `pixelator` on `source` and keep the result on success.
    pub fn apply(
        &mut self,
        source: &PixelBuffer,
        pixelator: &Pixelator,
    ) -> Result<&PipelineOutput, PipelineError> {
        match pixelator.run(source) {
            Ok(output) => {
                tracing::debug!(
                    width = output.small.width(),
                    height = output.small.height(),
                    colors = output.palette.as_ref().map(|p| p.len()),
                    "Pixelation result replaced"
                );
                Ok(self.current.insert(output))
            }
            Err(e) => {
                tracing::error!(error = %e, "Pixelation failed, keeping previous result");
                Err(e)
            }
        }
    }

    /// The last successful result, if any.
    pub fn current(&self) -> Option<&PipelineOutput> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
