/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Binding request instances to HTTP requests.
//!
//! A request type's [`HttpTrait`](iot_model_schema::traits::HttpTrait) gives the method and
//! URI template. Each present member is then placed according to its binding: labels are
//! substituted into the path, query and header members are written as strings, and
//! everything else belongs to the body.

use crate::serde::write_value;
use crate::{BindingError, EncodeError, ModelInstance, Value};
use iot_model_schema::codec::http_string::HttpStringSerializer;
use iot_model_schema::codec::Codec;
use iot_model_schema::serde::ShapeSerializer;
use iot_model_schema::{HttpBinding, MemberSchema, Schema, ShapeType};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// base set of characters that must be URL encoded
const BASE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b':')
    .add(b',')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'@')
    .add(b'!')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b';')
    .add(b'=')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'"')
    .add(b'^')
    .add(b'`')
    .add(b'\\');

fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, BASE_SET).to_string()
}

/// The parts of an HTTP request derived from a request instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestParts {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body_members: Vec<String>,
}

impl HttpRequestParts {
    /// The HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The expanded, percent-encoded path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, unencoded, in template then declaration order. List members
    /// repeat their parameter once per element.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Headers in declaration order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Names of the present members that belong in the body.
    pub fn body_members(&self) -> &[String] {
        &self.body_members
    }

    /// Path plus the percent-encoded query string.
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(name, value)| format!("{}={}", uri_encode(name), uri_encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

fn to_http_string(member: &MemberSchema, value: &Value) -> Result<String, BindingError> {
    let serialize = |source: iot_model_schema::codec::http_string::HttpStringCodecError| {
        BindingError::Serialize {
            member: member.name().to_string(),
            source: source.into(),
        }
    };
    let mut serializer = HttpStringSerializer::new();
    write_value(&mut serializer, member, value).map_err(serialize)?;
    serializer.finish().map_err(serialize)
}

fn expand_label(
    instance: &ModelInstance,
    label: &str,
    template: &str,
) -> Result<String, BindingError> {
    let (name, greedy) = match label.strip_suffix('+') {
        Some(name) => (name, true),
        None => (label, false),
    };
    if name.is_empty() {
        return Err(BindingError::InvalidTemplate(template.to_string()));
    }
    let member = instance
        .schema()
        .get_member(name)
        .filter(|member| member.http_binding() == HttpBinding::Label)
        .ok_or_else(|| BindingError::UnboundLabel(name.to_string()))?;
    let value = instance
        .get_by_index(member.index())
        .ok_or_else(|| BindingError::MissingLabel(name.to_string()))?;
    let text = to_http_string(member, value)?;
    if text.is_empty() {
        return Err(BindingError::EmptyLabel(name.to_string()));
    }
    if greedy {
        Ok(text.split('/').map(uri_encode).collect::<Vec<_>>().join("/"))
    } else {
        Ok(uri_encode(&text))
    }
}

fn expand_path(instance: &ModelInstance, template: &str) -> Result<String, BindingError> {
    let invalid = || BindingError::InvalidTemplate(template.to_string());
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        if rest[start..].starts_with('}') {
            return Err(invalid());
        }
        let end = rest[start..].find('}').ok_or_else(invalid)? + start;
        path.push_str(&rest[..start]);
        path.push_str(&expand_label(instance, &rest[start + 1..end], template)?);
        rest = &rest[end + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

/// Binds a request instance to the parts of an HTTP request.
///
/// ```
/// # use std::sync::Arc;
/// # use iot_model_schema::{MemberSchema, StructureSchema};
/// # use iot_model_runtime::{http::bind_request, ModelInstance};
/// let schema = StructureSchema::builder("com.example#DescribeThingRequest")
///     .http("GET", "/things/{thingName}")
///     .member(MemberSchema::string("thingName").required().http_label())
///     .build()
///     .unwrap();
/// let request = ModelInstance::builder(Arc::new(schema))
///     .with("thingName", "my thing")
///     .build()
///     .unwrap();
/// let parts = bind_request(&request).unwrap();
/// assert_eq!(parts.method(), "GET");
/// assert_eq!(parts.path(), "/things/my%20thing");
/// ```
pub fn bind_request(instance: &ModelInstance) -> Result<HttpRequestParts, BindingError> {
    let http = instance
        .schema()
        .http()
        .ok_or_else(|| BindingError::MissingHttpTrait(instance.type_name().to_string()))?;
    let (template, literal_query) = match http.uri().split_once('?') {
        Some((template, query)) => (template, Some(query)),
        None => (http.uri(), None),
    };

    let mut query = Vec::new();
    for pair in literal_query.into_iter().flat_map(|q| q.split('&')) {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        query.push((name.to_string(), value.to_string()));
    }

    let path = expand_path(instance, template)?;
    let mut headers = Vec::new();
    let mut body_members = Vec::new();
    for (member, value) in instance.present_fields() {
        match member.http_binding() {
            HttpBinding::Label => {}
            HttpBinding::Query(name) => match value {
                Value::List(elements) if member.shape_type() == ShapeType::List => {
                    let element = member.element().unwrap_or(member);
                    for value in elements {
                        query.push((name.to_string(), to_http_string(element, value)?));
                    }
                }
                value => query.push((name.to_string(), to_http_string(member, value)?)),
            },
            HttpBinding::Header(name) => {
                headers.push((name.to_string(), to_http_string(member, value)?));
            }
            HttpBinding::Body => body_members.push(member.name().to_string()),
        }
    }

    tracing::debug!(
        type_name = instance.type_name(),
        method = http.method(),
        path = %path,
        "bound request"
    );
    Ok(HttpRequestParts {
        method: http.method().to_string(),
        path,
        query,
        headers,
        body_members,
    })
}

/// Encodes only the body-bound members of a request instance.
pub fn encode_body<C>(
    codec: &C,
    instance: &ModelInstance,
) -> Result<<C::Serializer as ShapeSerializer>::Output, EncodeError>
where
    C: Codec,
    <C::Serializer as ShapeSerializer>::Error: Send + Sync + 'static,
{
    let mut body = instance.clone();
    body.retain_fields(|member| member.http_binding() == HttpBinding::Body);
    crate::encode(codec, &body)
}
