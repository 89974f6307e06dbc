use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA, CNAME};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

pub const CLIENT: &str = "192.0.2.10:53000";

pub fn client() -> SocketAddr {
    CLIENT.parse().unwrap()
}

pub fn query(id: u16, name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    let mut question = Query::query(Name::from_str(name).unwrap(), record_type);
    question.set_query_class(DNSClass::IN);
    message.add_query(question);
    message
}

pub fn non_recursive(mut message: Message) -> Message {
    message.set_recursion_desired(false);
    message
}

pub fn reply_for(query: &Message) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true);
    for question in query.queries() {
        reply.add_query(question.clone());
    }
    reply
}

pub fn a_record(name: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), 60, RData::A(A(ip)))
}

pub fn aaaa_record(name: &str, ip: Ipv6Addr) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), 60, RData::AAAA(AAAA(ip)))
}

pub fn cname_record(name: &str, target: &str) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        60,
        RData::CNAME(CNAME(Name::from_str(target).unwrap())),
    )
}
