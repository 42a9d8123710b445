//! Integration tests against a live server bound to an ephemeral port
