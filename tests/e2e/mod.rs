// End-to-end tests for the Irish tutor relay backend
//
// Each test starts the full application on an ephemeral port together with a
// wiremock server standing in for every upstream provider (Anthropic,
// ElevenLabs, Azure Speech). Provider base URLs in the test configuration
// point at the mock server, and credentials come from a fixed in-memory store
// so the process environment never leaks into a test.
//
// Mocks declare `.expect(n)`; the mock server verifies call counts when it is
// dropped at the end of each test.

mod test_chat;
mod test_transcription;
