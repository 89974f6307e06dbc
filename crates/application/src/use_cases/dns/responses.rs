//! Synthesized replies. Every one of them copies the transaction id,
//! mirrors the recursion-desired flag and echoes the question.

use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::rdata::PTR;
use hickory_proto::rr::{Name, RData, Record};

fn reply_to(query: &Message, question: &Query) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .add_query(question.clone());
    response
}

/// Answer for a reverse lookup served from the passive cache.
pub fn cached_ptr(query: &Message, question: &Query, target: Name, ttl: u32) -> Message {
    let mut record = Record::from_rdata(question.name().clone(), ttl, RData::PTR(PTR(target)));
    record.set_dns_class(question.query_class());

    let mut response = reply_to(query, question);
    response
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError)
        .add_answer(record);
    response
}

/// We hold no authoritative data, so a query that does not want
/// recursion can only fail.
pub fn refuse_non_recursive(query: &Message, question: &Query) -> Message {
    let mut response = reply_to(query, question);
    response
        .set_recursion_available(false)
        .set_response_code(ResponseCode::ServFail);
    response
}

pub fn server_failure(query: &Message, question: &Query) -> Message {
    let mut response = reply_to(query, question);
    response
        .set_recursion_available(true)
        .set_response_code(ResponseCode::ServFail);
    response
}
