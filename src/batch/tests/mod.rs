/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 批量求解器单元测试
 *
 * 测试按功能分组：
 * - history: L-BFGS 环形历史
 * - cgd: 共轭梯度公式与方向
 * - params: 参数默认值、校验与 JSON 配置
 * - minimize: 求解流程（收敛、终止状态、回调）
 */

mod history;
