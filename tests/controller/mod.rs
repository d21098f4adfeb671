//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the director management API, verifying request
//! handling, status codes and response bodies.

mod director;

use warden_test_utils::prelude::*;

use crate::util::TestContextExt;
