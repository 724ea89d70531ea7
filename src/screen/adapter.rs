//! Data adapters: how a host produces a screen's props.
//!
//! The props type is fixed by the screen; each host picks its own adapter
//! (server-side fetch, build-time constants, an app-side cache) as long as it
//! yields exactly that type.

use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::capabilities::DataSource;

pub trait DataAdapter<P> {
    /// What the host passes in to select the data (route params, ids).
    type Request;

    fn load(&self, request: &Self::Request) -> Result<P>;
}

/// Precomputed props, handed out unchanged.
#[derive(Debug, Clone)]
pub struct StaticProps<P> {
    props: P,
}

impl<P: Clone> StaticProps<P> {
    pub fn new(props: P) -> Self {
        StaticProps { props }
    }
}

impl<P: Clone> DataAdapter<P> for StaticProps<P> {
    type Request = ();

    fn load(&self, _request: &()) -> Result<P> {
        Ok(self.props.clone())
    }
}

/// Reads the record named by the request key from a [`DataSource`] and
/// deserializes it into the props type.
pub struct SourceProps<P> {
    source: Arc<dyn DataSource>,
    _props: PhantomData<fn() -> P>,
}

impl<P> SourceProps<P> {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        SourceProps {
            source,
            _props: PhantomData,
        }
    }
}

impl<P: DeserializeOwned> DataAdapter<P> for SourceProps<P> {
    type Request = String;

    fn load(&self, key: &String) -> Result<P> {
        let value = self.source.get(key)?;
        serde_json::from_value(value)
            .with_context(|| format!("record `{}` does not match the screen's props", key))
    }
}
