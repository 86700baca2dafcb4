//! Base64 and UTF-8 encode/decode form.

use super::FormStatus;
use crate::algorithm::TextCodec;
use crate::error::GatewayResult;
use crate::provider::CryptoGateway;
use crate::request::CodecRequest;

/// Which way the form converts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Text to encoded
    #[default]
    Encode,
    /// Encoded to text
    Decode,
}

/// Codec form.
#[derive(Debug)]
pub struct CodecForm {
    /// Codec
    pub codec: TextCodec,
    /// Conversion direction
    pub direction: Direction,
    /// Input
    pub input: String,
    /// Last output
    pub output: String,
    /// Busy flag and notice
    pub status: FormStatus,
}

impl CodecForm {
    /// Empty encode form for `codec`.
    #[must_use]
    pub fn new(codec: TextCodec) -> Self {
        Self {
            codec,
            direction: Direction::default(),
            input: String::new(),
            output: String::new(),
            status: FormStatus::default(),
        }
    }

    /// Switch direction; input, output and notice are cleared.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.clear();
        }
    }

    /// Convert the input in the current direction.
    ///
    /// # Errors
    ///
    /// Returns the failure that was also written to the notice.
    pub async fn submit<G>(&mut self, gateway: &G) -> GatewayResult<()>
    where
        G: CryptoGateway + ?Sized,
    {
        let request = CodecRequest::new(self.codec, self.input.clone());
        let name = self.codec.algorithm();
        self.output = match self.direction {
            Direction::Encode => {
                self.status
                    .track(gateway.encode(&request), format!("{name} encoding succeeded"))
                    .await?
            }
            Direction::Decode => {
                self.status
                    .track(gateway.decode(&request), format!("{name} decoding succeeded"))
                    .await?
            }
        };
        Ok(())
    }

    /// Clear input, output and notice.
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.status.clear();
    }
}
