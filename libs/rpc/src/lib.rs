// @generated
// This file wires up buf-generated protobuf code for proto/mailinglist.proto.
// Regenerate with `buf generate` after editing the .proto file.

pub mod mailinglist {
    include!("gen/mailinglist.rs");
    include!("gen/mailinglist.tonic.rs");
}
