//! Sample gateway responses shared by unit tests.

/// Response to a query by out_trade_no: two refunds on one order.
pub const ORDER_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xml>
  <appid>000000</appid>
  <cash_fee>6</cash_fee>
  <mch_id>000000</mch_id>
  <nonce_str>GwUbVYPcPZz0T8Lg</nonce_str>
  <out_refund_no_0>20190705171118247841</out_refund_no_0>
  <out_refund_no_1>20190705171048982976</out_refund_no_1>
  <out_trade_no>20190705170959530641</out_trade_no>
  <refund_account_0>REFUND_SOURCE_UNSETTLED_FUNDS</refund_account_0>
  <refund_account_1>REFUND_SOURCE_UNSETTLED_FUNDS</refund_account_1>
  <refund_channel_0>ORIGINAL</refund_channel_0>
  <refund_channel_1>ORIGINAL</refund_channel_1>
  <refund_count>2</refund_count>
  <refund_fee>4</refund_fee>
  <refund_fee_0>1</refund_fee_0>
  <refund_fee_1>3</refund_fee_1>
  <refund_id_0>50000201152019070510323842871</refund_id_0>
  <refund_id_1>50000201152019070510395660782</refund_id_1>
  <refund_recv_accout_0>工商银行借记卡3234</refund_recv_accout_0>
  <refund_recv_accout_1>工商银行借记卡3234</refund_recv_accout_1>
  <refund_status_0>SUCCESS</refund_status_0>
  <refund_status_1>SUCCESS</refund_status_1>
  <refund_success_time_0>2019-07-05 17:15:51</refund_success_time_0>
  <refund_success_time_1>2019-07-05 17:15:19</refund_success_time_1>
  <result_code>SUCCESS</result_code>
  <return_code>SUCCESS</return_code>
  <return_msg>OK</return_msg>
  <sign>000000</sign>
  <total_fee>6</total_fee>
  <transaction_id>4200000289201907058815070594</transaction_id>
</xml>"#;

/// Response to a query by out_refund_no.
pub const SINGLE_REFUND_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xml>
  <appid>000000</appid>
  <cash_fee>6</cash_fee>
  <mch_id>000000</mch_id>
  <nonce_str>ORXm2pdxYtc2VoUd</nonce_str>
  <out_refund_no_0>20190705171118247841</out_refund_no_0>
  <out_trade_no>20190705170959530641</out_trade_no>
  <refund_account_0>REFUND_SOURCE_UNSETTLED_FUNDS</refund_account_0>
  <refund_channel_0>ORIGINAL</refund_channel_0>
  <refund_count>1</refund_count>
  <refund_fee>1</refund_fee>
  <refund_fee_0>1</refund_fee_0>
  <refund_id_0>50000201152019070510323842871</refund_id_0>
  <refund_recv_accout_0>工商银行借记卡3234</refund_recv_accout_0>
  <refund_status_0>SUCCESS</refund_status_0>
  <refund_success_time_0>2019-07-05 17:15:51</refund_success_time_0>
  <result_code>SUCCESS</result_code>
  <return_code>SUCCESS</return_code>
  <return_msg>OK</return_msg>
  <sign>000000</sign>
  <total_fee>6</total_fee>
  <transaction_id>4200000289201907058815070594</transaction_id>
</xml>"#;
